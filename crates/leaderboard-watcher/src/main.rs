//! # Leaderboard Watcher CLI
//!
//! Connects to the scores store once and prints the leaderboard ranking
//! until interrupted. Any store failure ends the process with a non-zero
//! status.

use clap::Parser;
use leaderboard_store::RedisScoresStore;
use leaderboard_watcher::{
    init_tracing, shutdown_signal, Args, Config, LeaderboardWatcher, SnapshotPrinter,
};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    init_tracing(&config.log_level, config.log_format);

    info!(
        version = leaderboard_watcher::VERSION,
        key = %config.leaderboard_key,
        interval_ms = config.poll_interval.as_millis(),
        "Starting leaderboard watcher"
    );

    let store_config = config.store_config()?;
    info!(store = %store_config.url, "Connecting to scores store");

    let store = RedisScoresStore::connect(&store_config).await?;
    info!(store = %store.url(), "Scores store connected");

    let mut watcher = LeaderboardWatcher::new(
        store,
        SnapshotPrinter::new(config.label.as_str()),
        std::io::stdout(),
        config.watch_options(),
    );

    let summary = watcher.run_until(shutdown_signal()).await?;
    info!(polls = summary.polls, "Leaderboard watcher exited");

    Ok(())
}
