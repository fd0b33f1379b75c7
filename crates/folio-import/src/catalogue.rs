//! Backend catalogue contract

use thiserror::Error;

use folio_domain::{Article, Author, Edition, Event};

use crate::records::{NewArticle, NewAuthor, NewEdition, NewEvent};

/// How a catalogue call can fail. The variant decides how far the failure
/// reaches: `Conflict` and `Rejected` stay local to one entry, `Unavailable`
/// aborts the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    /// A uniqueness invariant already holds the record being created.
    #[error("already exists: {0}")]
    Conflict(String),

    /// The backend refused this request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The backend cannot be reached at all.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// The durable catalogue the import workflow reconciles against.
///
/// Lookups take `&self`, creations `&mut self`; each method is one bounded
/// request to the backing store. Creations mint the entity's id and slug.
pub trait Catalogue {
    /// Case-insensitive lookup of an event by display name.
    fn event_by_name(&self, name: &str) -> Result<Option<Event>, CatalogueError>;

    fn create_event(&mut self, event: NewEvent) -> Result<Event, CatalogueError>;

    fn edition_of(&self, event_id: &str, year: i32) -> Result<Option<Edition>, CatalogueError>;

    fn create_edition(&mut self, edition: NewEdition) -> Result<Edition, CatalogueError>;

    /// Exact-match lookup on the (given, family) name pair.
    fn author_by_name(&self, given: &str, family: &str) -> Result<Option<Author>, CatalogueError>;

    /// A duplicate (given, family) pair is a [`CatalogueError::Conflict`],
    /// never a second record.
    fn create_author(&mut self, author: NewAuthor) -> Result<Author, CatalogueError>;

    fn create_article(&mut self, article: NewArticle) -> Result<Article, CatalogueError>;
}
