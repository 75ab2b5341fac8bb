//! # Leaderboard Domain Model
//!
//! Value types for a sorted-set leaderboard as seen by a read-only
//! consumer. Entries are produced and ordered by the scores store; nothing
//! here computes, sorts, or mutates a ranking.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::fmt;

// =============================================================================
// ENTRIES
// =============================================================================

/// A single leaderboard member with its score
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub member: String,
    pub score: f64,
}

impl LeaderboardEntry {
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

impl From<(String, f64)> for LeaderboardEntry {
    fn from((member, score): (String, f64)) -> Self {
        Self { member, score }
    }
}

impl From<(&str, f64)> for LeaderboardEntry {
    fn from((member, score): (&str, f64)) -> Self {
        Self::new(member, score)
    }
}

/// Score rendered the way the console output expects it.
///
/// Follows the JVM's `Double.toString`: magnitudes in `[1e-3, 1e7)` print
/// as plain decimals with at least one fractional digit (`120.0`, `95.5`),
/// everything else in scientific form (`1.2345678E7`, `1.0E-4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScore(pub f64);

impl fmt::Display for DisplayScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = value.abs();
        if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
            // Debug keeps plain notation in this range and always shows a fraction.
            return write!(f, "{value:?}");
        }

        let sci = format!("{value:e}");
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Ordered result of one query against a leaderboard.
///
/// Entries keep exactly the order the store returned them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    key: String,
    entries: Vec<LeaderboardEntry>,
}

impl Snapshot {
    pub fn new(key: impl Into<String>, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }

    /// Snapshot of a leaderboard that has no members (or does not exist)
    pub fn empty(key: impl Into<String>) -> Self {
        Self::new(key, Vec::new())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries paired with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = RankedEntry<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| RankedEntry {
                rank: idx + 1,
                entry,
            })
    }

}

/// An entry paired with its position in the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub entry: &'a LeaderboardEntry,
}

impl<'a> RankedEntry<'a> {
    #[must_use]
    pub fn member(&self) -> &'a str {
        &self.entry.member
    }

    #[must_use]
    pub const fn score(&self) -> DisplayScore {
        DisplayScore(self.entry.score)
    }
}
