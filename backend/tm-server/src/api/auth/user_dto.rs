use tm_core::User;

use serde::Serialize;

/// User DTO for JSON serialization. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub role: String,
    pub registered_at: i64,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            is_active: u.is_active,
            is_verified: u.is_verified,
            role: u.role.to_string(),
            registered_at: u.registered_at.timestamp(),
        }
    }
}
