//! In-memory catalogue for tests and embedded use

use folio_domain::{slug, Article, Author, AuthorName, Edition, Event};

use crate::catalogue::{Catalogue, CatalogueError};
use crate::records::{NewArticle, NewAuthor, NewEdition, NewEvent};

/// A process-local catalogue enforcing the same invariants as the real
/// backend: unique event names and slugs, one edition per (event, year),
/// one author per (given, family) pair, articles referencing existing
/// editions and authors.
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    events: Vec<Event>,
    editions: Vec<Edition>,
    authors: Vec<Author>,
    articles: Vec<Article>,
}

impl MemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn editions(&self) -> &[Edition] {
        &self.editions
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    fn event_slug_taken(&self, candidate: &str) -> bool {
        self.events.iter().any(|e| e.slug == candidate)
    }

    fn author_slug_taken(&self, candidate: &str) -> bool {
        self.authors.iter().any(|a| a.slug == candidate)
    }
}

impl Catalogue for MemoryCatalogue {
    fn event_by_name(&self, name: &str) -> Result<Option<Event>, CatalogueError> {
        let wanted = name.trim();
        Ok(self
            .events
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(wanted))
            .cloned())
    }

    fn create_event(&mut self, event: NewEvent) -> Result<Event, CatalogueError> {
        if self
            .events
            .iter()
            .any(|e| e.name.eq_ignore_ascii_case(&event.name))
        {
            return Err(CatalogueError::Conflict(event.name));
        }
        let base = slug::slugify(&event.name);
        let unique = slug::disambiguate(&base, |s| self.event_slug_taken(s));
        let mut created = Event::new(event.name, unique);
        created.organizer = event.organizer;
        self.events.push(created.clone());
        Ok(created)
    }

    fn edition_of(&self, event_id: &str, year: i32) -> Result<Option<Edition>, CatalogueError> {
        Ok(self
            .editions
            .iter()
            .find(|ed| ed.event_id == event_id && ed.year == year)
            .cloned())
    }

    fn create_edition(&mut self, edition: NewEdition) -> Result<Edition, CatalogueError> {
        let event = self
            .events
            .iter()
            .find(|e| e.id == edition.event_id)
            .ok_or_else(|| {
                CatalogueError::Rejected(format!("unknown event {}", edition.event_id))
            })?;
        if self
            .editions
            .iter()
            .any(|ed| ed.event_id == edition.event_id && ed.year == edition.year)
        {
            return Err(CatalogueError::Conflict(format!(
                "{} {}",
                event.name, edition.year
            )));
        }
        let created = Edition::new(
            edition.event_id.clone(),
            edition.year,
            Edition::slug_for(&event.slug, edition.year),
        );
        self.editions.push(created.clone());
        Ok(created)
    }

    fn author_by_name(&self, given: &str, family: &str) -> Result<Option<Author>, CatalogueError> {
        Ok(self
            .authors
            .iter()
            .find(|a| a.given_name == given && a.family_name == family)
            .cloned())
    }

    fn create_author(&mut self, author: NewAuthor) -> Result<Author, CatalogueError> {
        if self
            .authors
            .iter()
            .any(|a| a.given_name == author.given_name && a.family_name == author.family_name)
        {
            return Err(CatalogueError::Conflict(format!(
                "{} {}",
                author.given_name, author.family_name
            )));
        }
        let name = AuthorName {
            given: author.given_name,
            family: author.family_name,
        };
        let base = Author::slug_base(&name);
        let unique = slug::disambiguate(&base, |s| self.author_slug_taken(s));
        let created = Author::new(&name, unique);
        self.authors.push(created.clone());
        Ok(created)
    }

    fn create_article(&mut self, article: NewArticle) -> Result<Article, CatalogueError> {
        if !self.editions.iter().any(|ed| ed.id == article.edition_id) {
            return Err(CatalogueError::Rejected(format!(
                "unknown edition {}",
                article.edition_id
            )));
        }
        for author_id in &article.author_ids {
            if !self.authors.iter().any(|a| a.id == *author_id) {
                return Err(CatalogueError::Rejected(format!(
                    "unknown author {}",
                    author_id
                )));
            }
        }
        let mut created = Article::new(article.title, article.edition_id, article.author_ids);
        created.keywords = article.keywords;
        created.document_path = article.document_path;
        self.articles.push(created.clone());
        Ok(created)
    }
}
