use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Signing secret constraints
pub const MIN_SECRET_LENGTH: usize = 32;

// Token lifetime constraints (seconds)
pub const MIN_TOKEN_LIFETIME_SECS: u64 = 60;
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

// bcrypt cost constraints
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;
pub const DEFAULT_MIN_HASH_COST: u32 = 14;

pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Credential and session token settings.
/// The signing secret has no default; startup fails without it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens
    pub secret: Option<String>,
    /// Signing algorithm (HS256, HS384, HS512)
    pub algorithm: String,
    /// Session token lifetime in seconds
    pub token_lifetime_secs: u64,
    /// Minimum bcrypt cost; stored hashes below this are upgraded on login
    pub min_hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: String::from(DEFAULT_ALGORITHM),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            min_hash_cost: DEFAULT_MIN_HASH_COST,
        }
    }
}

impl AuthConfig {
    /// Validate all fields are present and within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.secret is required (set TM_AUTH_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.secret must be at least {} characters, got {}",
                    MIN_SECRET_LENGTH,
                    secret.len()
                )));
            }
            Some(_) => {}
        }

        if !matches!(self.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(ConfigError::auth(format!(
                "auth.algorithm must be HS256, HS384 or HS512, got {}",
                self.algorithm
            )));
        }

        if self.token_lifetime_secs < MIN_TOKEN_LIFETIME_SECS
            || self.token_lifetime_secs > MAX_TOKEN_LIFETIME_SECS
        {
            return Err(ConfigError::auth(format!(
                "auth.token_lifetime_secs must be {}-{}, got {}",
                MIN_TOKEN_LIFETIME_SECS, MAX_TOKEN_LIFETIME_SECS, self.token_lifetime_secs
            )));
        }

        if self.min_hash_cost < MIN_HASH_COST || self.min_hash_cost > MAX_HASH_COST {
            return Err(ConfigError::auth(format!(
                "auth.min_hash_cost must be {}-{}, got {}",
                MIN_HASH_COST, MAX_HASH_COST, self.min_hash_cost
            )));
        }

        Ok(())
    }

    /// Signing secret after validation has passed
    pub fn secret_bytes(&self) -> ConfigErrorResult<&[u8]> {
        self.secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or_else(|| ConfigError::auth("auth.secret is required (set TM_AUTH_SECRET)"))
    }
}
