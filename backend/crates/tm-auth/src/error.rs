use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Account is inactive {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Insufficient privileges {location}")]
    Forbidden { location: ErrorLocation },

    #[error("Password hashing failed: {source} {location}")]
    Hash {
        #[source]
        source: bcrypt::BcryptError,
        location: ErrorLocation,
    },

    #[error("Credential store failure: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Hash { .. } => "HASH_FAILED",
            Self::Store { .. } => "STORE_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
