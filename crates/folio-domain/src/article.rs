//! Article representation and the import preview draft

use serde::{Deserialize, Serialize};

/// A published article in the catalogue.
///
/// References exactly one existing [`crate::Edition`]; `author_ids` is in
/// citation order and stays that way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub keywords: Option<String>,
    pub document_path: Option<String>,
    pub edition_id: String,
    pub author_ids: Vec<String>,
}

impl Article {
    /// Create a new article with a freshly minted id.
    pub fn new(
        title: impl Into<String>,
        edition_id: impl Into<String>,
        author_ids: Vec<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            keywords: None,
            document_path: None,
            edition_id: edition_id.into(),
            author_ids,
        }
    }
}

/// What an import preview shows for one parsed entry: the fields as written
/// in the source document, before anything is persisted.
///
/// `resolved_edition` is the slug of the existing edition the entry would
/// land in, or `None` when that cannot be determined yet (unknown venue, no
/// year, or an edition that would have to be created first).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub cite_key: String,
    pub title: String,
    pub category: String,
    pub venue: Option<String>,
    pub year: Option<i32>,
    pub keywords: Option<String>,
    pub authors: Vec<String>,
    pub resolved_edition: Option<String>,
}

impl ArticleDraft {
    /// Whether this draft carries the fields persistence always requires.
    pub fn is_persistable(&self) -> bool {
        !self.title.is_empty() && !self.authors.is_empty()
    }
}
