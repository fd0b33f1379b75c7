//! Document bundles accompanying a direct-persist import

use std::collections::HashMap;

/// Documents uploaded alongside a BibTeX file, keyed by base filename.
///
/// An entry claims a document when its cite key equals the document's base
/// filename exactly (case-sensitive). Unmatched documents are ignored;
/// entries without a match proceed with no stored document location.
#[derive(Clone, Debug, Default)]
pub struct DocumentBundle {
    locations: HashMap<String, String>,
}

impl DocumentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under its filename. The location is what a
    /// matched article will carry as its stored document reference.
    pub fn insert(&mut self, filename: &str, location: impl Into<String>) {
        let base = match filename.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => filename,
        };
        self.locations.insert(base.to_string(), location.into());
    }

    /// The stored location for an entry's cite key, if a document matched.
    pub fn locate(&self, cite_key: &str) -> Option<&str> {
        self.locations.get(cite_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
