use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues and validates signed, time-limited session tokens.
///
/// Validation is stateless: a token is judged solely by its signature and
/// registered claims, never by server-side session state.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    algorithm: Algorithm,
    token_lifetime_secs: u64,
}

impl TokenIssuer {
    /// Create an issuer from a symmetric secret
    #[track_caller]
    pub fn new(algorithm: &str, secret: &[u8], token_lifetime_secs: u64) -> AuthErrorResult<Self> {
        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(AuthError::InvalidToken {
                    message: format!("Unsupported signing algorithm: {}", other),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(algorithm),
            validation,
            algorithm,
            token_lifetime_secs,
        })
    }

    /// Sign a token for the given user id, expiring after the configured lifetime
    #[track_caller]
    pub fn issue(&self, user_id: i64) -> AuthErrorResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.token_lifetime_secs as i64,
            iat: now,
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| AuthError::JwtEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Validate a token and return its claims
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        // Additional claim validation
        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    pub fn token_lifetime_secs(&self) -> u64 {
        self.token_lifetime_secs
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &str {
        match self.algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            _ => "unknown",
        }
    }
}
