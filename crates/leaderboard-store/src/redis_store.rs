//! # Redis Scores Store
//!
//! Redis-backed leaderboard reads over a single multiplexed connection.
//! The connection is opened once and never re-established; a dropped
//! connection surfaces as a [`StoreAccessError`] on the next fetch.

use async_trait::async_trait;
use leaderboard_domain::{LeaderboardEntry, Snapshot};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, AsyncConnectionConfig, Client};
use std::fmt;
use std::time::Duration;

use crate::error::{Result, StoreAccessError};
use crate::traits::ScoresStore;

const DEFAULT_PORT: u16 = 6379;

/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub connect_timeout: Duration,
    pub response_timeout: Duration,
}

impl StoreConfig {
    /// Build a config from a bare host, `host:port`, or full Redis URL
    pub fn from_address(addr: &str) -> Result<Self> {
        Ok(Self {
            url: normalize_store_address(addr)?,
            ..Self::default()
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: format!("redis://localhost:{DEFAULT_PORT}"),
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(5),
        }
    }
}

/// Turn a store address into a connection URL.
///
/// `localhost` becomes `redis://localhost:6379`, `cache:6380` becomes
/// `redis://cache:6380`. Anything with a scheme is passed through.
pub fn normalize_store_address(addr: &str) -> Result<String> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(StoreAccessError::InvalidAddress(
            "store address is empty".to_string(),
        ));
    }

    if addr.contains("://") {
        return Ok(addr.to_string());
    }

    // Bracketed IPv6 literals carry their own colons.
    let has_port = match addr.rfind(']') {
        Some(end) => addr[end..].contains(':'),
        None => addr.matches(':').count() == 1,
    };

    if has_port {
        Ok(format!("redis://{addr}"))
    } else {
        Ok(format!("redis://{addr}:{DEFAULT_PORT}"))
    }
}

/// Scores store backed by Redis sorted sets
#[derive(Clone)]
pub struct RedisScoresStore {
    conn: MultiplexedConnection,
    url: String,
}

impl RedisScoresStore {
    /// Open the connection the store will use for its whole lifetime
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;

        tracing::debug!(
            url = %config.url,
            connect_timeout_ms = config.connect_timeout.as_millis(),
            response_timeout_ms = config.response_timeout.as_millis(),
            "Opening scores store connection"
        );

        let conn_config = AsyncConnectionConfig::new()
            .set_connection_timeout(config.connect_timeout)
            .set_response_timeout(config.response_timeout);
        let conn = client
            .get_multiplexed_async_connection_with_config(&conn_config)
            .await?;

        Ok(Self {
            conn,
            url: config.url.clone(),
        })
    }

    /// URL this store is connected to
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for RedisScoresStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisScoresStore")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Build entries from a `WITHSCORES` reply.
///
/// Members are binary-safe in Redis; bytes that are not valid UTF-8 are
/// replaced rather than failing the whole snapshot.
fn entries_from_reply(rows: Vec<(Vec<u8>, f64)>) -> Vec<LeaderboardEntry> {
    rows.into_iter()
        .map(|(member, score)| {
            LeaderboardEntry::new(String::from_utf8_lossy(&member).into_owned(), score)
        })
        .collect()
}

#[async_trait]
impl ScoresStore for RedisScoresStore {
    async fn fetch_descending(&self, key: &str) -> Result<Snapshot> {
        let mut conn = self.conn.clone();

        // ZREVRANGE key 0 -1 WITHSCORES (highest score first)
        let rows: Vec<(Vec<u8>, f64)> = conn.zrevrange_withscores(key, 0, -1).await?;

        tracing::trace!(key, entries = rows.len(), "Fetched leaderboard");

        Ok(Snapshot::new(key, entries_from_reply(rows)))
    }
}
