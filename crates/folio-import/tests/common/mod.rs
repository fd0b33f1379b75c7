//! Shared fixtures for the import workflow tests
#![allow(dead_code)]

use folio_domain::{Article, Author, Edition, Event};
use folio_import::{
    Catalogue, CatalogueError, MemoryCatalogue, NewArticle, NewAuthor, NewEdition, NewEvent,
};

/// One complete conference entry against an empty catalogue.
pub const SINGLE_ENTRY: &str = r#"
@inproceedings{acme-1,
    author = {Jane Doe},
    title = {T},
    booktitle = {ACME Conf},
    year = {2024}
}
"#;

/// One complete entry plus one for each skip reason.
pub const MIXED_BATCH: &str = r#"
@inproceedings{good-1,
    author = {Jane Doe},
    title = {Complete Entry},
    booktitle = {ACME Conf},
    year = {2024}
}
@inproceedings{no-title,
    author = {John Roe},
    booktitle = {ACME Conf},
    year = {2024}
}
@inproceedings{no-authors,
    title = {Orphan Paper},
    booktitle = {ACME Conf},
    year = {2024}
}
@inproceedings{no-venue,
    author = {John Roe},
    title = {Homeless Paper}
}
"#;

/// Three entries citing three venues; the second venue is a tripwire for
/// [`TripwireCatalogue`].
pub const THREE_VENUES: &str = r#"
@inproceedings{ok-1,
    author = {Jane Doe},
    title = {First},
    booktitle = {First Conf},
    year = {2024}
}
@inproceedings{boom-2,
    author = {John Roe},
    title = {Second},
    booktitle = {Boom Conf},
    year = {2024}
}
@inproceedings{after-3,
    author = {Ada Lovelace},
    title = {Third},
    booktitle = {Third Conf},
    year = {2024}
}
"#;

/// Delegates to a [`MemoryCatalogue`] until asked about the tripwire venue,
/// then reports the backend as unreachable.
pub struct TripwireCatalogue {
    pub inner: MemoryCatalogue,
    trip_venue: &'static str,
}

impl TripwireCatalogue {
    pub fn new(trip_venue: &'static str) -> Self {
        Self {
            inner: MemoryCatalogue::new(),
            trip_venue,
        }
    }
}

impl Catalogue for TripwireCatalogue {
    fn event_by_name(&self, name: &str) -> Result<Option<Event>, CatalogueError> {
        if name.trim() == self.trip_venue {
            return Err(CatalogueError::Unavailable("connection reset".to_string()));
        }
        self.inner.event_by_name(name)
    }

    fn create_event(&mut self, event: NewEvent) -> Result<Event, CatalogueError> {
        self.inner.create_event(event)
    }

    fn edition_of(&self, event_id: &str, year: i32) -> Result<Option<Edition>, CatalogueError> {
        self.inner.edition_of(event_id, year)
    }

    fn create_edition(&mut self, edition: NewEdition) -> Result<Edition, CatalogueError> {
        self.inner.create_edition(edition)
    }

    fn author_by_name(&self, given: &str, family: &str) -> Result<Option<Author>, CatalogueError> {
        self.inner.author_by_name(given, family)
    }

    fn create_author(&mut self, author: NewAuthor) -> Result<Author, CatalogueError> {
        self.inner.create_author(author)
    }

    fn create_article(&mut self, article: NewArticle) -> Result<Article, CatalogueError> {
        self.inner.create_article(article)
    }
}
