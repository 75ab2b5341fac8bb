//! # Watcher Configuration
//!
//! Environment-based configuration. Command-line flags are applied on top
//! (see [`crate::cli::Args`]).

use leaderboard_store::StoreConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::output::DEFAULT_LABEL;
use crate::telemetry::LogFormat;
use crate::watcher::WatchOptions;

pub const DEFAULT_STORE_ADDR: &str = "localhost";
pub const DEFAULT_LEADERBOARD_KEY: &str = "last-action-stats";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Scores store address: host, `host:port`, or full Redis URL
    pub store_addr: String,

    /// Sorted set holding the leaderboard
    pub leaderboard_key: String,

    /// Pause between polls
    pub poll_interval: Duration,

    /// Prefix of every ranking line
    pub label: String,

    pub connect_timeout: Duration,
    pub response_timeout: Duration,

    /// Stop after this many polls
    pub max_polls: Option<u64>,

    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            store_addr: lookup("SCORES_STORE_ADDR")
                .unwrap_or_else(|| DEFAULT_STORE_ADDR.to_string()),

            leaderboard_key: lookup("LEADERBOARD_KEY")
                .unwrap_or_else(|| DEFAULT_LEADERBOARD_KEY.to_string()),

            poll_interval: Duration::from_millis(parse_var(
                &lookup,
                "POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?),

            label: lookup("LEADERBOARD_LABEL").unwrap_or_else(|| DEFAULT_LABEL.to_string()),

            connect_timeout: Duration::from_millis(parse_var(
                &lookup,
                "STORE_CONNECT_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )?),

            response_timeout: Duration::from_millis(parse_var(
                &lookup,
                "STORE_RESPONSE_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )?),

            max_polls: None,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),

            log_format: match lookup("LOG_FORMAT") {
                Some(value) => value.parse()?,
                None => LogFormat::default(),
            },
        })
    }

    /// Reject settings the watch loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaderboard_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::NotPositive("poll interval"));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::NotPositive("connect timeout"));
        }
        if self.response_timeout.is_zero() {
            return Err(ConfigError::NotPositive("response timeout"));
        }
        if self.max_polls == Some(0) {
            return Err(ConfigError::NotPositive("poll count"));
        }
        Ok(())
    }

    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        Ok(StoreConfig {
            connect_timeout: self.connect_timeout,
            response_timeout: self.response_timeout,
            ..StoreConfig::from_address(&self.store_addr)?
        })
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            key: self.leaderboard_key.clone(),
            poll_interval: self.poll_interval,
            max_polls: self.max_polls,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_addr: DEFAULT_STORE_ADDR.to_string(),
            leaderboard_key: DEFAULT_LEADERBOARD_KEY.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            label: DEFAULT_LABEL.to_string(),
            connect_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            response_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_polls: None,
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::InvalidNumber { var, value })
        }
        None => Ok(default),
    }
}
