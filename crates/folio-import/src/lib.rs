//! BibTeX bulk import for the folio catalogue
//!
//! One import session covers the life of one uploaded document: parse it,
//! optionally show a read-only preview, then persist entry by entry while
//! reconciling venue, edition, and author references against the catalogue.
//! Entities missing from the catalogue are created on first encounter and
//! cached for the rest of the run, so two entries citing the same new venue
//! share one Event and a name pair never produces two Authors.
//!
//! Per-entry problems never abort the batch: they are recorded in the
//! [`ImportReport`] as Skipped (missing required fields) or Errored (the
//! backend refused a request). Only two things end a session early: a
//! malformed document, and the backend becoming unreachable mid-batch (the
//! report is then truncated and flagged).

pub mod catalogue;
pub mod documents;
pub mod error;
pub mod memory;
pub mod reconcile;
pub mod records;
pub mod report;
pub mod session;

pub use catalogue::{Catalogue, CatalogueError};
pub use documents::DocumentBundle;
pub use error::{ImportError, Result, SessionError};
pub use memory::MemoryCatalogue;
pub use reconcile::{CreatedEntities, Reconciler};
pub use records::{NewArticle, NewAuthor, NewEdition, NewEvent};
pub use report::{ErroredEntry, ImportOutcome, ImportReport, SkipReason, SkippedEntry};
pub use session::{ImportOptions, ImportSession, SessionState};
