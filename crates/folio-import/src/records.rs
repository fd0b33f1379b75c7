//! Typed request payloads for the catalogue boundary
//!
//! Every shape crossing the backend boundary is an explicit record with
//! named fields; optional fields default rather than being read ad hoc out
//! of dynamic maps.

use serde::{Deserialize, Serialize};

/// Request to create an event from a venue name as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub organizer: Option<String>,
}

/// Request to create one year's edition of an existing event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEdition {
    pub event_id: String,
    pub year: i32,
}

/// Request to create an author from a split citation name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub given_name: String,
    pub family_name: String,
}

/// Request to create an article against resolved references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub document_path: Option<String>,
    pub edition_id: String,
    /// Citation order; preserved on the stored article.
    pub author_ids: Vec<String>,
}
