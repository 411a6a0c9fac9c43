use serde::Serialize;

/// Freshly issued session token.
/// The same token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
