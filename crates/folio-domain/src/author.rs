//! Author representation and the citation name-splitting policy

use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// A citation name split into its parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorName {
    pub given: String,
    pub family: String,
}

impl AuthorName {
    /// Split a raw display name as written in a citation.
    ///
    /// Legacy policy, kept for backward compatibility with the existing
    /// catalogue: the first whitespace-delimited token is the given name and
    /// the remainder is the family name; a single token is used as both.
    /// Returns `None` for a blank name.
    pub fn split(raw: &str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let first = tokens.next()?;
        let rest = tokens.collect::<Vec<_>>().join(" ");
        if rest.is_empty() {
            Some(Self {
                given: first.to_string(),
                family: first.to_string(),
            })
        } else {
            Some(Self {
                given: first.to_string(),
                family: rest,
            })
        }
    }

    /// Format as "Given Family" for display.
    pub fn display(&self) -> String {
        format!("{} {}", self.given, self.family)
    }
}

/// A person in the catalogue, unique by (given name, family name).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub slug: String,
    pub affiliation: Option<String>,
    pub expertise: Option<String>,
}

impl Author {
    /// Create a new author with a freshly minted id.
    pub fn new(name: &AuthorName, slug: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            given_name: name.given.clone(),
            family_name: name.family.clone(),
            slug: slug.into(),
            affiliation: None,
            expertise: None,
        }
    }

    /// Slug base for this name pair; the owning store disambiguates on
    /// collision.
    pub fn slug_base(name: &AuthorName) -> String {
        slugify(&format!("{} {}", name.given, name.family))
    }

    /// Format as "Given Family" for display.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    /// Builder method to set the affiliation.
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }
}
