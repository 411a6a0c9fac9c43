use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use bcrypt::HashParts;
use error_location::ErrorLocation;

const DUMMY_PASSWORD: &str = "tm-dummy-password-for-unknown-users";

/// Outcome of a password verification
#[derive(Debug)]
pub struct VerifyOutcome {
    pub matched: bool,
    /// Rehash at the configured cost, present only when the stored hash
    /// matched but was produced with a lower cost
    pub upgraded_hash: Option<String>,
}

/// Bcrypt-backed hashing policy with a configurable minimum cost.
///
/// All operations here are CPU-bound; callers on an async runtime must move
/// them onto a blocking thread.
#[derive(Clone)]
pub struct PasswordPolicy {
    cost: u32,
    dummy_hash: String,
}

impl PasswordPolicy {
    /// Create a policy, precomputing the throwaway hash used to equalize
    /// timing for lookups that find no user
    #[track_caller]
    pub fn new(cost: u32) -> AuthErrorResult<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost).map_err(|e| AuthError::Hash {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password at the configured cost
    #[track_caller]
    pub fn hash(&self, password: &str) -> AuthErrorResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Hash {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// The underlying comparison is constant-time. When the hash matches but
    /// its embedded cost is below the configured minimum, a rehash at the
    /// current cost is returned alongside so the caller can persist it.
    #[track_caller]
    pub fn verify(&self, password: &str, stored_hash: &str) -> AuthErrorResult<VerifyOutcome> {
        let matched = bcrypt::verify(password, stored_hash).map_err(|e| AuthError::Hash {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !matched {
            return Ok(VerifyOutcome {
                matched: false,
                upgraded_hash: None,
            });
        }

        let upgraded_hash = match stored_hash.parse::<HashParts>() {
            Ok(parts) if parts.get_cost() < self.cost => Some(self.hash(password)?),
            _ => None,
        };

        Ok(VerifyOutcome {
            matched: true,
            upgraded_hash,
        })
    }

    /// Burn one verification against the precomputed hash.
    ///
    /// Called on the unknown-user path so its latency matches a real
    /// verification and does not reveal whether the account exists.
    pub fn verify_dummy(&self, password: &str) {
        let _ = bcrypt::verify(password, &self.dummy_hash);
    }
}
