//! Account roles - closed set with explicit permission checks.

use crate::{CoreError, ErrorLocation, Result};

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Role assigned to an account. Permission checks go through the methods
/// below rather than comparing role names at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Whether this role may access administrative endpoints
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Stable integer discriminant used by the persistence layer
    pub fn as_i64(&self) -> i64 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    #[track_caller]
    pub fn from_i64(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Role::User),
            2 => Ok(Role::Admin),
            _ => Err(CoreError::InvalidRole {
                value,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}
