//! # Leaderboard Watcher
//!
//! Polls a sorted-set leaderboard in the scores store and prints the
//! ranking to stdout, one block per poll:
//!
//! ```text
//! Country Stats - 1 : USA = 120.0
//! Country Stats - 2 : India = 95.0
//! Country Stats - 3 : Brazil = 95.0
//! -------------------------------------------------------
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leaderboard_store::{RedisScoresStore, StoreConfig};
//! use leaderboard_watcher::{LeaderboardWatcher, SnapshotPrinter, WatchOptions};
//!
//! let store = RedisScoresStore::connect(&StoreConfig::default()).await?;
//! let mut watcher = LeaderboardWatcher::new(
//!     store,
//!     SnapshotPrinter::default(),
//!     std::io::stdout(),
//!     WatchOptions::new("last-action-stats", Duration::from_secs(5)),
//! );
//! watcher.run_until(shutdown_signal()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod shutdown;
pub mod telemetry;
pub mod watcher;

pub use cli::Args;
pub use config::Config;
pub use error::{ConfigError, WatchError};
pub use output::SnapshotPrinter;
pub use shutdown::shutdown_signal;
pub use telemetry::{init_tracing, LogFormat};
pub use watcher::{LeaderboardWatcher, RunSummary, WatchOptions, WatcherState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
