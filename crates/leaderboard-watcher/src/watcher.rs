//! # Leaderboard Watcher
//!
//! The poll loop: fetch the snapshot, print it, sleep, repeat. Any store
//! failure ends the run; the caller decides what to do with it.

use leaderboard_domain::Snapshot;
use leaderboard_store::ScoresStore;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Result, WatchError};
use crate::output::SnapshotPrinter;

/// What to watch and how often
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub key: String,
    pub poll_interval: Duration,
    /// Stop after this many polls; `None` polls until shutdown
    pub max_polls: Option<u64>,
}

impl WatchOptions {
    pub fn new(key: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            key: key.into(),
            poll_interval,
            max_polls: None,
        }
    }

    #[must_use]
    pub const fn with_max_polls(mut self, max_polls: u64) -> Self {
        self.max_polls = Some(max_polls);
        self
    }
}

/// Lifecycle of a watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Steady state, including the sleep between polls
    Polling,
    /// Shutdown requested or poll limit reached
    Stopped,
    /// A store or output failure ended the run
    Terminated,
}

/// Totals for a run that ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub polls: u64,
    pub entries_printed: u64,
}

pub struct LeaderboardWatcher<S, W> {
    store: S,
    printer: SnapshotPrinter,
    out: W,
    options: WatchOptions,
    state: WatcherState,
    summary: RunSummary,
}

impl<S: ScoresStore, W: Write> LeaderboardWatcher<S, W> {
    pub const fn new(store: S, printer: SnapshotPrinter, out: W, options: WatchOptions) -> Self {
        Self {
            store,
            printer,
            out,
            options,
            state: WatcherState::Polling,
            summary: RunSummary {
                polls: 0,
                entries_printed: 0,
            },
        }
    }

    pub const fn state(&self) -> WatcherState {
        self.state
    }

    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn output(&self) -> &W {
        &self.out
    }

    /// One fetch-and-print cycle, without the sleep.
    ///
    /// A failed fetch prints nothing and moves the watcher to
    /// [`WatcherState::Terminated`].
    pub async fn poll_once(&mut self) -> Result<Snapshot> {
        let snapshot = match self.store.fetch_descending(&self.options.key).await {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.terminate(err.into())),
        };

        let written = self
            .printer
            .write_snapshot(&mut self.out, &snapshot)
            .and_then(|lines| self.out.flush().map(|()| lines));
        let lines = match written {
            Ok(lines) => lines,
            Err(err) => return Err(self.terminate(err.into())),
        };

        self.summary.polls += 1;
        self.summary.entries_printed += lines as u64;

        debug!(
            key = %self.options.key,
            poll = self.summary.polls,
            entries = lines,
            "Printed leaderboard snapshot"
        );

        Ok(snapshot)
    }

    /// Poll until `shutdown` resolves, the poll limit is reached, or the
    /// store fails.
    ///
    /// Both the sleep and an in-flight fetch are abandoned as soon as
    /// `shutdown` completes.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            key = %self.options.key,
            interval_ms = self.options.poll_interval.as_millis(),
            max_polls = ?self.options.max_polls,
            "Watching leaderboard"
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => return Ok(self.stop("shutdown requested")),
                polled = self.poll_once() => {
                    polled?;
                }
            }

            if self
                .options
                .max_polls
                .is_some_and(|max| self.summary.polls >= max)
            {
                return Ok(self.stop("poll limit reached"));
            }

            tokio::select! {
                biased;
                () = &mut shutdown => return Ok(self.stop("shutdown requested")),
                () = tokio::time::sleep(self.options.poll_interval) => {}
            }
        }
    }

    fn stop(&mut self, reason: &str) -> RunSummary {
        self.state = WatcherState::Stopped;
        info!(
            reason,
            polls = self.summary.polls,
            entries = self.summary.entries_printed,
            "Watcher stopped"
        );
        self.summary
    }

    fn terminate(&mut self, err: WatchError) -> WatchError {
        self.state = WatcherState::Terminated;
        debug!(
            key = %self.options.key,
            error = %err,
            polls = self.summary.polls,
            "Leaderboard watch aborted"
        );
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DEFAULT_SEPARATOR;
    use leaderboard_store::{MemoryScoresStore, StoreAccessError};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    /// Records the level of every event it sees
    #[derive(Clone, Default)]
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    const KEY: &str = "last-action-stats";
    const INTERVAL: Duration = Duration::from_millis(5000);

    fn country_store() -> MemoryScoresStore {
        let store = MemoryScoresStore::new();
        store.zadd(KEY, "USA", 120.0);
        store.zadd(KEY, "India", 95.0);
        store.zadd(KEY, "Brazil", 95.0);
        store
    }

    fn watcher(
        store: MemoryScoresStore,
        options: WatchOptions,
    ) -> LeaderboardWatcher<MemoryScoresStore, Vec<u8>> {
        LeaderboardWatcher::new(store, SnapshotPrinter::default(), Vec::new(), options)
    }

    fn printed(watcher: &LeaderboardWatcher<MemoryScoresStore, Vec<u8>>) -> String {
        String::from_utf8(watcher.output().clone()).unwrap()
    }

    fn country_block() -> String {
        format!(
            "Country Stats - 1 : USA = 120.0\n\
             Country Stats - 2 : India = 95.0\n\
             Country Stats - 3 : Brazil = 95.0\n\
             {DEFAULT_SEPARATOR}\n"
        )
    }

    #[tokio::test]
    async fn test_poll_once_prints_ranked_block() {
        let mut w = watcher(country_store(), WatchOptions::new(KEY, INTERVAL));

        let snapshot = assert_ok!(w.poll_once().await);

        assert_eq!(snapshot.len(), 3);
        assert_eq!(printed(&w), country_block());
        assert_eq!(w.summary().entries_printed, 3);
        assert_eq!(w.state(), WatcherState::Polling);
    }

    #[tokio::test]
    async fn test_missing_key_prints_only_separator() {
        let mut w = watcher(MemoryScoresStore::new(), WatchOptions::new(KEY, INTERVAL));

        assert_ok!(w.poll_once().await);

        assert_eq!(printed(&w), format!("{DEFAULT_SEPARATOR}\n"));
        assert_eq!(w.summary().polls, 1);
    }

    #[tokio::test]
    async fn test_every_poll_queries_the_store() {
        let store = country_store();
        let mut w = watcher(store, WatchOptions::new(KEY, INTERVAL));

        assert_ok!(w.poll_once().await);
        w.store().zadd(KEY, "Brazil", 200.0);
        assert_ok!(w.poll_once().await);

        let text = printed(&w);
        let second_block: Vec<&str> = text.lines().skip(4).collect();
        assert_eq!(second_block[0], "Country Stats - 1 : Brazil = 200.0");
        assert_eq!(w.store().fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_polls_print_identical_blocks() {
        let options = WatchOptions::new(KEY, INTERVAL).with_max_polls(2);
        let mut w = watcher(country_store(), options);

        let started = Instant::now();
        let summary = assert_ok!(w.run_until(std::future::pending()).await);

        assert_eq!(summary.polls, 2);
        assert_eq!(w.store().fetch_count(), 2);
        assert_eq!(printed(&w), country_block().repeat(2));
        // One sleep between the two polls, none after the last.
        assert_eq!(started.elapsed(), INTERVAL);
        assert_eq!(w.state(), WatcherState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_refused_terminates_without_output() {
        let store = country_store();
        store.fail_next(StoreAccessError::Connection("Connection refused (os error 111)".into()));
        let mut w = watcher(store, WatchOptions::new(KEY, INTERVAL));

        let err = assert_err!(w.run_until(std::future::pending()).await);

        assert!(matches!(
            err,
            WatchError::Store(StoreAccessError::Connection(_))
        ));
        assert!(printed(&w).is_empty());
        assert_eq!(w.state(), WatcherState::Terminated);
    }

    #[tokio::test]
    async fn test_store_failure_is_left_to_the_caller_to_report() {
        let recorder = LevelRecorder::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(recorder.clone()));

        let store = country_store();
        store.fail_next(StoreAccessError::Connection("Connection refused (os error 111)".into()));
        let mut w = watcher(store, WatchOptions::new(KEY, INTERVAL));
        assert_err!(w.run_until(std::future::pending()).await);

        let levels = recorder.0.lock().unwrap().clone();
        assert!(levels.contains(&Level::DEBUG));
        // Nothing at WARN or ERROR, so the default filter prints only main's report.
        assert!(levels.iter().all(|level| *level > Level::WARN));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_mid_run_stops_the_stream() {
        let store = country_store();
        let mut w = watcher(store, WatchOptions::new(KEY, INTERVAL));
        assert_ok!(w.poll_once().await);
        w.store()
            .fail_next(StoreAccessError::Timeout("response timed out".into()));

        let err = assert_err!(w.run_until(std::future::pending()).await);

        assert!(matches!(err, WatchError::Store(StoreAccessError::Timeout(_))));
        assert_eq!(printed(&w), country_block());
        assert_eq!(w.store().fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_sleep() {
        let mut w = watcher(country_store(), WatchOptions::new(KEY, INTERVAL));

        let started = Instant::now();
        let shutdown = tokio::time::sleep(Duration::from_millis(12_000));
        let summary = assert_ok!(w.run_until(shutdown).await);

        // Polls at 0s, 5s and 10s; the sleep towards 15s is cut short.
        assert_eq!(summary.polls, 3);
        assert_eq!(started.elapsed(), Duration::from_millis(12_000));
        assert_eq!(w.state(), WatcherState::Stopped);
    }

    #[tokio::test]
    async fn test_shutdown_before_first_poll() {
        let mut w = watcher(country_store(), WatchOptions::new(KEY, INTERVAL));

        let summary = assert_ok!(w.run_until(std::future::ready(())).await);

        assert_eq!(summary, RunSummary::default());
        assert_eq!(w.store().fetch_count(), 0);
        assert!(printed(&w).is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_output_failure_terminates() {
        let mut w = LeaderboardWatcher::new(
            country_store(),
            SnapshotPrinter::default(),
            BrokenPipe,
            WatchOptions::new(KEY, INTERVAL),
        );

        let err = assert_err!(w.poll_once().await);

        assert!(matches!(err, WatchError::Output(_)));
        assert_eq!(w.state(), WatcherState::Terminated);
    }
}
