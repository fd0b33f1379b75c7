//! Preview flow and session state machine tests

mod common;

use common::{MIXED_BATCH, SINGLE_ENTRY};
use folio_import::{
    ImportOptions, ImportSession, MemoryCatalogue, SessionError, SessionState,
};

#[test]
fn preview_creates_nothing() {
    let catalogue = MemoryCatalogue::new();
    let mut session = ImportSession::begin(SINGLE_ENTRY).unwrap();
    let drafts = session.preview(&catalogue).unwrap();

    assert_eq!(session.state(), SessionState::PreviewReady);
    assert_eq!(drafts.len(), 1);
    let draft = &drafts[0];
    assert_eq!(draft.cite_key, "acme-1");
    assert_eq!(draft.title, "T");
    assert_eq!(draft.category, "inproceedings");
    assert_eq!(draft.venue.as_deref(), Some("ACME Conf"));
    assert_eq!(draft.year, Some(2024));
    assert_eq!(draft.authors, vec!["Jane Doe"]);
    // Nothing exists yet, so the edition cannot be determined.
    assert_eq!(draft.resolved_edition, None);

    assert!(catalogue.events().is_empty());
    assert!(catalogue.editions().is_empty());
    assert!(catalogue.authors().is_empty());
}

#[test]
fn preview_shows_editions_that_already_exist() {
    let mut catalogue = MemoryCatalogue::new();
    let mut seed = ImportSession::begin(SINGLE_ENTRY).unwrap();
    seed.persist(&mut catalogue, &ImportOptions::default())
        .unwrap();

    let mut session = ImportSession::begin(SINGLE_ENTRY).unwrap();
    let drafts = session.preview(&catalogue).unwrap();
    assert_eq!(drafts[0].resolved_edition.as_deref(), Some("acme-conf-2024"));
}

#[test]
fn incomplete_entries_preview_with_blank_fields() {
    let catalogue = MemoryCatalogue::new();
    let mut session = ImportSession::begin(MIXED_BATCH).unwrap();
    let drafts = session.preview(&catalogue).unwrap();

    let draft_for = |key: &str| drafts.iter().find(|d| d.cite_key == key).unwrap();
    assert_eq!(draft_for("no-title").title, "");
    assert!(draft_for("no-authors").authors.is_empty());
    assert_eq!(draft_for("no-venue").venue, None);
    assert_eq!(draft_for("no-venue").year, None);
}

#[test]
fn preview_then_persist_round_trip() {
    let doc = r#"
@inproceedings{a,
    author = {Jane Doe},
    title = {First},
    booktitle = {ACME Conf},
    year = {2024}
}
@inproceedings{b,
    author = {John Roe},
    title = {Second},
    booktitle = {ACME Conf},
    year = {2024}
}
@inproceedings{c,
    title = {No Authors},
    booktitle = {ACME Conf},
    year = {2024}
}
"#;
    let mut catalogue = MemoryCatalogue::new();
    let mut session = ImportSession::begin(doc).unwrap();

    let drafts = session.preview(&catalogue).unwrap();
    let persistable = drafts.iter().filter(|d| d.is_persistable()).count();
    assert_eq!(persistable, 2);

    // Same session, same parsed entries; no re-parse needed.
    let report = session
        .persist(&mut catalogue, &ImportOptions::default())
        .unwrap();
    assert_eq!(report.created, persistable);
    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn completed_session_rejects_further_work() {
    let mut catalogue = MemoryCatalogue::new();
    let mut session = ImportSession::begin(SINGLE_ENTRY).unwrap();
    session
        .persist(&mut catalogue, &ImportOptions::default())
        .unwrap();

    let err = session
        .persist(&mut catalogue, &ImportOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidTransition {
            from: SessionState::Completed,
            to: SessionState::Persisting,
        }
    );
    assert!(session.preview(&catalogue).is_err());
}

#[test]
fn persisting_before_preview_is_the_direct_flow() {
    let mut catalogue = MemoryCatalogue::new();
    let mut session = ImportSession::begin(SINGLE_ENTRY).unwrap();
    session
        .persist(&mut catalogue, &ImportOptions::default())
        .unwrap();
    // Preview after the fact is meaningless and rejected.
    assert!(session.preview(&catalogue).is_err());
}
