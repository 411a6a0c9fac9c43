use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Account email, unique (required)
    pub email: String,

    /// Display name, unique (required)
    pub username: String,

    /// Plaintext password, hashed before storage (required)
    pub password: String,
}
