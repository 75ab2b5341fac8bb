//! # Leaderboard Store
//!
//! Read access to sorted-set leaderboards held by an external scores store.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     LeaderboardWatcher       │
//! └──────────────────────────────┘
//!                │ fetch_descending(key)
//!                ▼
//! ┌──────────────────────────────┐
//! │   ScoresStore (trait)        │
//! └──────────────────────────────┘
//!          │              │
//!          ▼              ▼
//! ┌────────────────┐  ┌──────────────────┐
//! │ RedisScores-   │  │ MemoryScores-    │
//! │ Store (ZREV-   │  │ Store (tests)    │
//! │ RANGE)         │  │                  │
//! └────────────────┘  └──────────────────┘
//! ```
//!
//! ## Features
//!
//! - `redis`: Enable the Redis backend (default)
//! - `testing`: Enable the in-memory store used by tests

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod traits;

pub use error::{Result, StoreAccessError};
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryScoresStore;
#[cfg(feature = "redis")]
pub use redis_store::{normalize_store_address, RedisScoresStore, StoreConfig};
pub use traits::ScoresStore;

pub use leaderboard_domain::{LeaderboardEntry, Snapshot};
