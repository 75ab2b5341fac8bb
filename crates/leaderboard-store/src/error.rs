//! Scores store error types

use thiserror::Error;

/// Any failure while talking to the scores store.
///
/// Every variant is fatal to the watch loop; the variants only tell the
/// operator what went wrong.
#[derive(Debug, Error)]
pub enum StoreAccessError {
    #[error("cannot reach scores store: {0}")]
    Connection(String),

    #[error("scores store timed out: {0}")]
    Timeout(String),

    #[error("malformed response from scores store: {0}")]
    MalformedResponse(String),

    #[error("invalid scores store address: {0}")]
    InvalidAddress(String),

    #[error("scores store rejected command: {0}")]
    Command(String),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreAccessError {
    fn from(err: redis::RedisError) -> Self {
        use redis::ErrorKind;

        let message = err.to_string();
        if err.is_timeout() {
            return Self::Timeout(message);
        }
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            return Self::Connection(message);
        }
        match err.kind() {
            ErrorKind::TypeError => Self::MalformedResponse(message),
            ErrorKind::InvalidClientConfig => Self::InvalidAddress(message),
            ErrorKind::AuthenticationFailed => Self::Connection(message),
            _ => Self::Command(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreAccessError>;
