//! User account entity.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. `password_hash` is opaque to everything except the
/// credential verifier, which reads it and may write an upgraded hash back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub role: Role,
    pub registered_at: DateTime<Utc>,
}
