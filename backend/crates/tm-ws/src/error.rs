use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send buffer full, client too slow {location}")]
    SendBufferFull { location: ErrorLocation },

    #[error("Broadcast write timed out after {timeout_ms}ms {location}")]
    WriteTimeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Connection limit exceeded: {current} connections (max: {max}) {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::SendBufferFull { .. } => "SLOW_CLIENT",
            Self::WriteTimeout { .. } => "WRITE_TIMEOUT",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
