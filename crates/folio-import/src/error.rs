//! Session-level error types
//!
//! Per-entry problems are not errors: they land in the report as Skipped or
//! Errored outcomes. These types cover the failures that end (or refuse) a
//! session.

use thiserror::Error;

use crate::session::SessionState;

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// A failure fatal to the whole session.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The submitted document is not valid BibTeX; no entries are processed.
    #[error("parse error: {0}")]
    Parse(#[from] folio_bibtex::ParseError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Misuse of the session state machine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid session transition from {from} to {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
}
