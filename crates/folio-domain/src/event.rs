//! Event (venue) representation

use serde::{Deserialize, Serialize};

/// A named recurring venue: a conference series or journal.
///
/// The slug is unique across events and derived deterministically from the
/// name; see [`crate::slug`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub organizer: Option<String>,
}

impl Event {
    /// Create a new event with a freshly minted id.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            slug: slug.into(),
            organizer: None,
        }
    }

    /// Builder method to set the promoting organization.
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_new() {
        let event = Event::new("ACME Conf", "acme-conf");
        assert_eq!(event.name, "ACME Conf");
        assert_eq!(event.slug, "acme-conf");
        assert!(event.organizer.is_none());
        assert!(!event.id.is_empty());
    }

    #[test]
    fn event_with_organizer() {
        let event = Event::new("ACME Conf", "acme-conf").with_organizer("ACME Society");
        assert_eq!(event.organizer.as_deref(), Some("ACME Society"));
    }
}
