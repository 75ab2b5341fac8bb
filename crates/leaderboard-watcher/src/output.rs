//! # Console Output
//!
//! Plain-text rendering of a leaderboard snapshot: one line per entry,
//! then a separator line.

use leaderboard_domain::{RankedEntry, Snapshot};
use std::io::{self, Write};

/// Default prefix of every ranking line
pub const DEFAULT_LABEL: &str = "Country Stats";

/// Line written after every snapshot
pub const DEFAULT_SEPARATOR: &str = "-------------------------------------------------------";

/// Formats snapshots as `<label> - <rank> : <member> = <score>` lines
#[derive(Debug, Clone)]
pub struct SnapshotPrinter {
    label: String,
    separator: String,
}

impl SnapshotPrinter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn format_line(&self, ranked: &RankedEntry<'_>) -> String {
        format!(
            "{} - {} : {} = {}",
            self.label,
            ranked.rank,
            ranked.member(),
            ranked.score()
        )
    }

    /// Write every entry in store order followed by the separator.
    ///
    /// Returns the number of ranking lines written.
    pub fn write_snapshot<W: Write + ?Sized>(
        &self,
        out: &mut W,
        snapshot: &Snapshot,
    ) -> io::Result<usize> {
        let mut lines = 0;
        for ranked in snapshot.ranked() {
            writeln!(out, "{}", self.format_line(&ranked))?;
            lines += 1;
        }
        writeln!(out, "{}", self.separator)?;
        Ok(lines)
    }
}

impl Default for SnapshotPrinter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}
