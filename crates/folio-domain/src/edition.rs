//! Edition representation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One year's occurrence of an [`crate::Event`].
///
/// The (event, year) pair is unique. Descriptive fields are optional and
/// left empty when the edition is created as a side effect of an import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub id: String,
    pub event_id: String,
    pub year: i32,
    pub slug: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub site_url: Option<String>,
}

impl Edition {
    /// Create a new edition with a freshly minted id and empty descriptive
    /// fields.
    pub fn new(event_id: impl Into<String>, year: i32, slug: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.into(),
            year,
            slug: slug.into(),
            start_date: None,
            end_date: None,
            location: None,
            site_url: None,
        }
    }

    /// Canonical edition slug: the owning event's slug plus the year.
    pub fn slug_for(event_slug: &str, year: i32) -> String {
        format!("{}-{}", event_slug, year)
    }
}
