
use crate::{AuthError, Result as AuthErrorResult, UserStore};

use std::panic::Location;
use std::sync::Mutex;

use async_trait::async_trait;
use error_location::ErrorLocation;
use tm_core::{Role, User};

pub(crate) fn test_user(id: i64, email: &str, password_hash: &str) -> User {
    User {
        id,
        email: email.to_string(),
        username: format!("user{}", id),
        password_hash: password_hash.to_string(),
        is_active: true,
        is_verified: true,
        role: Role::User,
        registered_at: chrono::Utc::now(),
    }
}

/// In-memory store that records hash upgrades and can be told to fail them
pub(crate) struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    pub(crate) updates: Mutex<Vec<(i64, String)>>,
    fail_updates: bool,
}

impl InMemoryUserStore {
    pub(crate) fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            updates: Mutex::new(Vec::new()),
            fail_updates: false,
        }
    }

    pub(crate) fn with_failing_updates(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            updates: Mutex::new(Vec::new()),
            fail_updates: true,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AuthErrorResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> AuthErrorResult<()> {
        if self.fail_updates {
            return Err(AuthError::Store {
                message: "update rejected".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.password_hash = password_hash.to_string();
        }
        self.updates
            .lock()
            .unwrap()
            .push((user_id, password_hash.to_string()));
        Ok(())
    }
}
