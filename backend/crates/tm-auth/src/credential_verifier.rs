use crate::{AuthError, PasswordPolicy, Result as AuthErrorResult, UserStore};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use tm_core::User;

/// Checks email/password pairs against the user store.
///
/// Both failure paths (unknown email, wrong password) return the same
/// `InvalidCredentials` error and cost one bcrypt verification, so callers
/// cannot distinguish them by response or latency.
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
    policy: PasswordPolicy,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn UserStore>, policy: PasswordPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Authenticate an email/password pair and return the matching user.
    ///
    /// A match against a hash below the configured cost is rehashed and
    /// persisted before returning; persistence failures are logged and the
    /// login still succeeds.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthErrorResult<User> {
        let Some(user) = self.store.find_by_email(email).await? else {
            self.burn_verification(password).await?;
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let policy = self.policy.clone();
        let password_owned = password.to_string();
        let stored_hash = user.password_hash.clone();
        let outcome = tokio::task::spawn_blocking(move || policy.verify(&password_owned, &stored_hash))
            .await
            .map_err(|e| AuthError::Store {
                message: format!("hash worker failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        if !outcome.matched {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(new_hash) = outcome.upgraded_hash {
            if let Err(e) = self.store.update_password_hash(user.id, &new_hash).await {
                log::warn!(
                    "Failed to persist upgraded password hash for user {}: {}",
                    user.id,
                    e
                );
            } else {
                log::info!("Upgraded password hash for user {}", user.id);
            }
        }

        Ok(user)
    }

    async fn burn_verification(&self, password: &str) -> AuthErrorResult<()> {
        let policy = self.policy.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || policy.verify_dummy(&password))
            .await
            .map_err(|e| AuthError::Store {
                message: format!("hash worker failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
