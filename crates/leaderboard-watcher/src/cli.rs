//! Command-line flags. Every flag is optional and overrides the value
//! loaded from the environment.

use clap::Parser;
use std::time::Duration;

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "leaderboard-watcher")]
#[command(about = "Print the ranking of a sorted-set leaderboard every few seconds")]
#[command(version)]
pub struct Args {
    /// Scores store address (host, host:port or redis:// URL)
    #[arg(long)]
    pub store_addr: Option<String>,

    /// Sorted set holding the leaderboard
    #[arg(short, long)]
    pub key: Option<String>,

    /// Pause between polls in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Prefix of every ranking line
    #[arg(long)]
    pub label: Option<String>,

    /// Connection timeout in milliseconds
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    /// Per-command response timeout in milliseconds
    #[arg(long)]
    pub response_timeout_ms: Option<u64>,

    /// Stop after this many polls
    #[arg(long, conflicts_with = "once")]
    pub polls: Option<u64>,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    pub fn apply(self, config: &mut Config) {
        if let Some(addr) = self.store_addr {
            config.store_addr = addr;
        }
        if let Some(key) = self.key {
            config.leaderboard_key = key;
        }
        if let Some(ms) = self.interval_ms {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(label) = self.label {
            config.label = label;
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.response_timeout_ms {
            config.response_timeout = Duration::from_millis(ms);
        }
        if self.once {
            config.max_polls = Some(1);
        } else if self.polls.is_some() {
            config.max_polls = self.polls;
        }
    }
}
