//! In-memory scores store.
//!
//! Mirrors Redis `ZREVRANGE` ordering: descending score, equal scores in
//! descending member order. Failures can be queued to make the next fetches
//! fail, which is how the watcher's error paths are exercised.

use async_trait::async_trait;
use leaderboard_domain::{LeaderboardEntry, Snapshot};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Result, StoreAccessError};
use crate::traits::ScoresStore;

#[derive(Default)]
pub struct MemoryScoresStore {
    sets: Mutex<HashMap<String, HashMap<String, f64>>>,
    failures: Mutex<VecDeque<StoreAccessError>>,
    fetches: AtomicUsize,
}

impl MemoryScoresStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `member`'s score in `key`, returns true if the member is new
    pub fn zadd(&self, key: &str, member: &str, score: f64) -> bool {
        let mut sets = self.sets.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sets.entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score)
            .is_none()
    }

    /// Remove `member` from `key`, dropping the key once it is empty
    pub fn zrem(&self, key: &str, member: &str) -> bool {
        let mut sets = self.sets.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(set) = sets.get_mut(key) else {
            return false;
        };
        let removed = set.remove(member).is_some();
        if set.is_empty() {
            sets.remove(key);
        }
        removed
    }

    /// Make the next fetch fail with `err`. Failures are consumed in order.
    pub fn fail_next(&self, err: StoreAccessError) {
        self.failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(err);
    }

    /// Number of fetches attempted, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoresStore for MemoryScoresStore {
    async fn fetch_descending(&self, key: &str) -> Result<Snapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self
            .failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
        {
            return Err(err);
        }

        let sets = self.sets.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut entries: Vec<LeaderboardEntry> = sets
            .get(key)
            .map(|set| {
                set.iter()
                    .map(|(member, score)| LeaderboardEntry::new(member.as_str(), *score))
                    .collect()
            })
            .unwrap_or_default();

        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.member.cmp(&a.member))
        });

        Ok(Snapshot::new(key, entries))
    }
}
