//! Entry reconciliation against the catalogue
//!
//! Resolves the Event, Edition, and Author records a parsed entry
//! references, creating missing ones. Resolutions are cached for the run:
//! two entries citing the same new venue share one Event, and re-resolving
//! a name pair never creates a second Author. The cache is owned by one
//! reconciler, lives for one session, and is never shared.

use std::collections::HashMap;

use folio_domain::{Article, Author, AuthorName, Edition, Event};

use crate::catalogue::{Catalogue, CatalogueError};
use crate::records::{NewArticle, NewAuthor, NewEdition, NewEvent};

/// Human-readable descriptions of the catalogue entities one run created,
/// kept so the report can show what the import introduced.
#[derive(Clone, Debug, Default)]
pub struct CreatedEntities {
    pub events: Vec<String>,
    pub editions: Vec<String>,
    pub authors: Vec<String>,
}

/// Lookup-or-create resolution for one import run.
pub struct Reconciler<'a, C: Catalogue> {
    catalogue: &'a mut C,
    events: HashMap<String, Event>,
    editions: HashMap<(String, i32), Edition>,
    authors: HashMap<AuthorName, Author>,
    created: CreatedEntities,
}

impl<'a, C: Catalogue> Reconciler<'a, C> {
    pub fn new(catalogue: &'a mut C) -> Self {
        Self {
            catalogue,
            events: HashMap::new(),
            editions: HashMap::new(),
            authors: HashMap::new(),
            created: CreatedEntities::default(),
        }
    }

    /// Hand back the created-entity ledger at the end of the run.
    pub fn into_created(self) -> CreatedEntities {
        self.created
    }

    /// Resolve a venue name to an event, creating it on first encounter.
    pub fn resolve_event(&mut self, venue: &str) -> Result<Event, CatalogueError> {
        let key = venue_key(venue);
        if let Some(event) = self.events.get(&key) {
            return Ok(event.clone());
        }
        let event = match self.catalogue.event_by_name(venue)? {
            Some(existing) => existing,
            None => self.create_event(venue)?,
        };
        self.events.insert(key, event.clone());
        Ok(event)
    }

    fn create_event(&mut self, venue: &str) -> Result<Event, CatalogueError> {
        let request = NewEvent {
            name: venue.trim().to_string(),
            organizer: None,
        };
        match self.catalogue.create_event(request) {
            Ok(event) => {
                tracing::info!(event = %event.name, slug = %event.slug, "created event");
                self.created.events.push(event.name.clone());
                Ok(event)
            }
            // The backend already holds this record: reuse it, don't fail.
            Err(CatalogueError::Conflict(_)) => {
                self.catalogue.event_by_name(venue)?.ok_or_else(|| {
                    CatalogueError::Rejected(format!(
                        "event {:?} conflicted on create but cannot be found",
                        venue
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve (event, year) to an edition, creating it on first encounter.
    pub fn resolve_edition(&mut self, event: &Event, year: i32) -> Result<Edition, CatalogueError> {
        let key = (event.id.clone(), year);
        if let Some(edition) = self.editions.get(&key) {
            return Ok(edition.clone());
        }
        let edition = match self.catalogue.edition_of(&event.id, year)? {
            Some(existing) => existing,
            None => self.create_edition(event, year)?,
        };
        self.editions.insert(key, edition.clone());
        Ok(edition)
    }

    fn create_edition(&mut self, event: &Event, year: i32) -> Result<Edition, CatalogueError> {
        let request = NewEdition {
            event_id: event.id.clone(),
            year,
        };
        match self.catalogue.create_edition(request) {
            Ok(edition) => {
                tracing::info!(event = %event.name, year, "created edition");
                self.created
                    .editions
                    .push(format!("{} — {}", event.name, year));
                Ok(edition)
            }
            Err(CatalogueError::Conflict(_)) => {
                self.catalogue.edition_of(&event.id, year)?.ok_or_else(|| {
                    CatalogueError::Rejected(format!(
                        "edition {} {} conflicted on create but cannot be found",
                        event.name, year
                    ))
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a split citation name to an author, creating on first
    /// encounter. Within one run the same name pair always yields the same
    /// record.
    pub fn resolve_author(&mut self, name: &AuthorName) -> Result<Author, CatalogueError> {
        if let Some(author) = self.authors.get(name) {
            return Ok(author.clone());
        }
        let author = match self
            .catalogue
            .author_by_name(&name.given, &name.family)?
        {
            Some(existing) => existing,
            None => self.create_author(name)?,
        };
        self.authors.insert(name.clone(), author.clone());
        Ok(author)
    }

    fn create_author(&mut self, name: &AuthorName) -> Result<Author, CatalogueError> {
        let request = NewAuthor {
            given_name: name.given.clone(),
            family_name: name.family.clone(),
        };
        match self.catalogue.create_author(request) {
            Ok(author) => {
                tracing::info!(author = %author.display_name(), "created author");
                self.created.authors.push(author.display_name());
                Ok(author)
            }
            Err(CatalogueError::Conflict(_)) => self
                .catalogue
                .author_by_name(&name.given, &name.family)?
                .ok_or_else(|| {
                    CatalogueError::Rejected(format!(
                        "author {} conflicted on create but cannot be found",
                        name.display()
                    ))
                }),
            Err(e) => Err(e),
        }
    }

    /// Create the article itself against the resolved references.
    pub fn persist_article(&mut self, article: NewArticle) -> Result<Article, CatalogueError> {
        self.catalogue.create_article(article)
    }
}

/// Cache key for venue names: case- and whitespace-insensitive.
fn venue_key(venue: &str) -> String {
    venue
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
