//! Watcher error types

use leaderboard_store::StoreAccessError;
use thiserror::Error;

/// Errors that end a watch run
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Store(#[from] StoreAccessError),

    #[error("failed to write leaderboard output: {0}")]
    Output(#[from] std::io::Error),
}

/// Configuration errors, reported before any connection is made
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("leaderboard key must not be empty")]
    EmptyKey,

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("unknown log format {0:?} (expected \"text\" or \"json\")")]
    InvalidLogFormat(String),

    #[error(transparent)]
    Store(#[from] StoreAccessError),
}

pub type Result<T> = std::result::Result<T, WatchError>;
