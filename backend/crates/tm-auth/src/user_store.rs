use crate::Result as AuthErrorResult;

use async_trait::async_trait;
use tm_core::User;

/// Backing store for credential lookups and password hash upgrades
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AuthErrorResult<Option<User>>;

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> AuthErrorResult<()>;
}
