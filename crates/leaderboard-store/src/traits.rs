//! # Store Traits
//!
//! Abstract access to the scores store. The watcher only depends on this
//! trait, so the Redis backend can be swapped for the in-memory one.

use async_trait::async_trait;
use leaderboard_domain::Snapshot;

use crate::error::Result;

/// Read-only view of named sorted sets
#[async_trait]
pub trait ScoresStore: Send + Sync {
    /// All members of `key` in descending score order, with scores.
    ///
    /// A key that does not exist yields an empty snapshot. Ordering among
    /// equal scores is whatever the store returns.
    async fn fetch_descending(&self, key: &str) -> Result<Snapshot>;
}
