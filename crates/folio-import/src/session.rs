//! Import session control
//!
//! Drives the two supported flows over one parsed document: preview (no
//! side effects) and persist (sequential reconciliation with real side
//! effects), and aggregates per-entry outcomes into the final report.
//! Entries are processed strictly in order because later entries may depend
//! on records created by earlier ones in the same run.

use std::fmt;

use serde::{Deserialize, Serialize};

use folio_bibtex::{parse_document, BibEntry};
use folio_domain::{ArticleDraft, AuthorName};

use crate::catalogue::{Catalogue, CatalogueError};
use crate::documents::DocumentBundle;
use crate::error::{ImportError, SessionError};
use crate::reconcile::Reconciler;
use crate::records::NewArticle;
use crate::report::{ImportOutcome, ImportReport, SkipReason};

/// Session lifecycle.
///
/// ```text
/// Idle → Parsed → PreviewReady → Persisting → Completed
///   ↓        ↘_________________↗
/// Failed
/// ```
///
/// `Failed` is reached only when the document itself does not parse;
/// everything after a successful parse ends in `Completed`, including a
/// batch truncated by a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Parsed,
    PreviewReady,
    Persisting,
    Completed,
    Failed,
}

impl SessionState {
    /// Check whether a state transition is valid.
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Parsed)
                | (SessionState::Idle, SessionState::Failed)
                | (SessionState::Parsed, SessionState::PreviewReady)
                | (SessionState::Parsed, SessionState::Persisting)
                | (SessionState::PreviewReady, SessionState::Persisting)
                | (SessionState::Persisting, SessionState::Completed)
        )
    }

    /// Whether the session is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "IDLE"),
            SessionState::Parsed => write!(f, "PARSED"),
            SessionState::PreviewReady => write!(f, "PREVIEW_READY"),
            SessionState::Persisting => write!(f, "PERSISTING"),
            SessionState::Completed => write!(f, "COMPLETED"),
            SessionState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Per-session configuration, passed explicitly rather than read from any
/// ambient store.
#[derive(Clone, Debug, Default)]
pub struct ImportOptions {
    pub documents: DocumentBundle,
}

/// One run of the import workflow, from document submission to final
/// report. Holds the parsed entries for its whole life so a preview can be
/// followed by a persist without re-parsing.
#[derive(Debug)]
pub struct ImportSession {
    entries: Vec<BibEntry>,
    state: SessionState,
    report: Option<ImportReport>,
}

impl ImportSession {
    /// Parse a BibTeX document and open a session over its entries.
    ///
    /// A malformed document fails the whole session up front; no partial
    /// entry list is kept.
    pub fn begin(content: &str) -> Result<Self, ImportError> {
        match parse_document(content) {
            Ok(entries) => {
                tracing::debug!(entries = entries.len(), "parsed import document");
                Ok(Self {
                    entries,
                    state: SessionState::Parsed,
                    report: None,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "import document failed to parse");
                Err(e.into())
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn entries(&self) -> &[BibEntry] {
        &self.entries
    }

    /// The final report, once the session has completed a persist.
    pub fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    /// Resolve every entry to draft form without touching catalogue state.
    ///
    /// Resolution is simulated read-only: nothing is created, and an entry
    /// whose edition cannot yet be determined shows that field blank.
    pub fn preview<C: Catalogue>(
        &mut self,
        catalogue: &C,
    ) -> Result<Vec<ArticleDraft>, SessionError> {
        self.transition(SessionState::PreviewReady)?;
        Ok(self
            .entries
            .iter()
            .map(|entry| draft_for(entry, catalogue))
            .collect())
    }

    /// Process every entry in order with real side effects and aggregate
    /// the report.
    ///
    /// Per-entry failures are isolated; a transport failure truncates the
    /// batch, flags the report, and still completes the session.
    pub fn persist<C: Catalogue>(
        &mut self,
        catalogue: &mut C,
        options: &ImportOptions,
    ) -> Result<ImportReport, SessionError> {
        self.transition(SessionState::Persisting)?;

        let mut report = ImportReport::default();
        let mut reconciler = Reconciler::new(catalogue);
        for entry in &self.entries {
            match persist_entry(&mut reconciler, entry, options) {
                Ok(outcome) => {
                    if let ImportOutcome::Skipped(reason) = &outcome {
                        tracing::debug!(key = %entry.cite_key, %reason, "entry skipped");
                    }
                    report.record(&entry.cite_key, outcome);
                }
                Err(CatalogueError::Unavailable(message)) => {
                    tracing::warn!(key = %entry.cite_key, %message, "backend unreachable, aborting batch");
                    report.aborted_early = true;
                    report.abort_reason = Some(message);
                    break;
                }
                Err(other) => {
                    tracing::warn!(key = %entry.cite_key, error = %other, "entry errored");
                    report.record(&entry.cite_key, ImportOutcome::Errored(other.to_string()));
                }
            }
        }

        let created = reconciler.into_created();
        report.created_events = created.events;
        report.created_editions = created.editions;
        report.created_authors = created.authors;

        self.transition(SessionState::Completed)?;
        tracing::info!(
            processed = report.processed,
            created = report.created,
            aborted = report.aborted_early,
            "import completed"
        );
        self.report = Some(report.clone());
        Ok(report)
    }

    fn transition(&mut self, to: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(to) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!(from = %self.state, to = %to, "session transition");
        self.state = to;
        Ok(())
    }
}

/// Run one entry through the reconciler. Skips are decided before any side
/// effect; only catalogue failures come back as errors.
fn persist_entry<C: Catalogue>(
    reconciler: &mut Reconciler<'_, C>,
    entry: &BibEntry,
    options: &ImportOptions,
) -> Result<ImportOutcome, CatalogueError> {
    let title = match entry.title() {
        Some(title) => title,
        None => return Ok(ImportOutcome::Skipped(SkipReason::MissingTitle)),
    };
    let names: Vec<AuthorName> = entry
        .author_names()
        .iter()
        .filter_map(|raw| AuthorName::split(raw))
        .collect();
    if names.is_empty() {
        return Ok(ImportOutcome::Skipped(SkipReason::MissingAuthors));
    }
    let (venue, year) = match (entry.venue(), entry.year()) {
        (Some(venue), Some(year)) => (venue, year),
        _ => return Ok(ImportOutcome::Skipped(SkipReason::MissingVenueOrYear)),
    };

    let event = reconciler.resolve_event(&venue)?;
    let edition = reconciler.resolve_edition(&event, year)?;
    let mut author_ids = Vec::with_capacity(names.len());
    for name in &names {
        author_ids.push(reconciler.resolve_author(name)?.id);
    }
    let document_path = options
        .documents
        .locate(&entry.cite_key)
        .map(str::to_string);

    reconciler.persist_article(NewArticle {
        title,
        keywords: entry.keywords(),
        document_path,
        edition_id: edition.id,
        author_ids,
    })?;
    Ok(ImportOutcome::Created)
}

fn draft_for<C: Catalogue>(entry: &BibEntry, catalogue: &C) -> ArticleDraft {
    let authors = entry
        .author_names()
        .iter()
        .filter_map(|raw| AuthorName::split(raw))
        .map(|name| name.display())
        .collect();
    ArticleDraft {
        cite_key: entry.cite_key.clone(),
        title: entry.title().unwrap_or_default(),
        category: entry.kind.as_str().to_string(),
        venue: entry.venue(),
        year: entry.year(),
        keywords: entry.keywords(),
        authors,
        resolved_edition: resolved_edition(entry, catalogue),
    }
}

/// Read-only probe for the existing edition an entry would land in. A
/// backend failure leaves the field undetermined rather than failing the
/// preview.
fn resolved_edition<C: Catalogue>(entry: &BibEntry, catalogue: &C) -> Option<String> {
    let venue = entry.venue()?;
    let year = entry.year()?;
    let event = match catalogue.event_by_name(&venue) {
        Ok(Some(event)) => event,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "catalogue probe failed during preview");
            return None;
        }
    };
    match catalogue.edition_of(&event.id, year) {
        Ok(found) => found.map(|edition| edition.slug),
        Err(e) => {
            tracing::warn!(error = %e, "catalogue probe failed during preview");
            None
        }
    }
}
