//! Per-entry outcomes and the aggregated import report

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a well-formed entry was not persisted. Not a failure of the
/// workflow; the user fixes the source document, not the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    MissingTitle,
    MissingAuthors,
    MissingVenueOrYear,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTitle => write!(f, "missing title"),
            SkipReason::MissingAuthors => write!(f, "missing authors"),
            SkipReason::MissingVenueOrYear => write!(f, "missing venue or year"),
        }
    }
}

/// The result of processing one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    Created,
    Skipped(SkipReason),
    Errored(String),
}

/// A skipped entry and the human-readable reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub key: String,
    pub reason: String,
}

/// An entry the backend refused, with the underlying message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErroredEntry {
    pub key: String,
    pub reason: String,
}

/// Aggregated result of one persisting run.
///
/// `processed` counts entries with a recorded outcome; when the batch was
/// truncated by a transport failure, `aborted_early` is set and the
/// unreached entries appear nowhere in the report. The created-entity lists
/// let a user audit which catalogue records this one import introduced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub processed: usize,
    pub created: usize,
    pub created_events: Vec<String>,
    pub created_editions: Vec<String>,
    pub created_authors: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
    pub errored: Vec<ErroredEntry>,
    pub aborted_early: bool,
    pub abort_reason: Option<String>,
}

impl ImportReport {
    /// Record one entry's outcome.
    pub fn record(&mut self, key: &str, outcome: ImportOutcome) {
        self.processed += 1;
        match outcome {
            ImportOutcome::Created => self.created += 1,
            ImportOutcome::Skipped(reason) => self.skipped.push(SkippedEntry {
                key: key.to_string(),
                reason: reason.to_string(),
            }),
            ImportOutcome::Errored(reason) => self.errored.push(ErroredEntry {
                key: key.to_string(),
                reason,
            }),
        }
    }

    /// True when every processed entry was persisted and the batch ran to
    /// the end.
    pub fn is_clean(&self) -> bool {
        !self.aborted_early && self.skipped.is_empty() && self.errored.is_empty()
    }
}
