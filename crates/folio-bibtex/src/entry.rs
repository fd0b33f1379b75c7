//! Parsed bibliographic records

/// Category of a BibTeX entry, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Article,
    Book,
    InProceedings,
    InCollection,
    Proceedings,
    PhdThesis,
    MastersThesis,
    TechReport,
    Misc,
    Unknown,
}

impl EntryKind {
    /// Parse an entry kind from its BibTeX spelling.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "inproceedings" | "conference" => Self::InProceedings,
            "incollection" => Self::InCollection,
            "proceedings" => Self::Proceedings,
            "phdthesis" => Self::PhdThesis,
            "mastersthesis" => Self::MastersThesis,
            "techreport" => Self::TechReport,
            "misc" => Self::Misc,
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InProceedings => "inproceedings",
            Self::InCollection => "incollection",
            Self::Proceedings => "proceedings",
            Self::PhdThesis => "phdthesis",
            Self::MastersThesis => "mastersthesis",
            Self::TechReport => "techreport",
            Self::Misc => "misc",
            Self::Unknown => "misc",
        }
    }
}

/// A single field of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// One bibliographic record as parsed from a BibTeX document.
///
/// Read-only after parsing; the import workflow consumes each entry exactly
/// once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    pub cite_key: String,
    pub kind: EntryKind,
    pub fields: Vec<Field>,
}

impl BibEntry {
    pub(crate) fn new(cite_key: String, kind: EntryKind) -> Self {
        Self {
            cite_key,
            kind,
            fields: Vec::new(),
        }
    }

    pub(crate) fn push_field(&mut self, name: String, value: String) {
        self.fields.push(Field { name, value });
    }

    /// Get a raw field value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    /// Title with BibTeX case-protection braces stripped. `None` when absent
    /// or blank.
    pub fn title(&self) -> Option<String> {
        self.get("title").map(strip_braces).filter(|t| !t.is_empty())
    }

    /// The raw author field as written in the document.
    pub fn author_field(&self) -> Option<&str> {
        self.get("author")
    }

    /// Author display names in citation order, split on the BibTeX `and`
    /// separator. Empty when the field is absent.
    pub fn author_names(&self) -> Vec<String> {
        self.author_field()
            .map(|field| {
                field
                    .split(" and ")
                    .map(|name| strip_braces(name))
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The venue name (the `booktitle` field), brace-stripped. `None` when
    /// absent or blank.
    pub fn venue(&self) -> Option<String> {
        self.get("booktitle")
            .map(strip_braces)
            .filter(|v| !v.is_empty())
    }

    /// The publication year, when present and numeric.
    pub fn year(&self) -> Option<i32> {
        self.get("year").and_then(|y| y.trim().parse().ok())
    }

    /// The keyword string, when present and non-blank.
    pub fn keywords(&self) -> Option<String> {
        self.get("keywords")
            .map(strip_braces)
            .filter(|k| !k.is_empty())
    }

    /// Page/locator info as written.
    pub fn pages(&self) -> Option<&str> {
        self.get("pages")
    }
}

/// Drop the braces BibTeX uses for case protection and trim.
fn strip_braces(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with(fields: &[(&str, &str)]) -> BibEntry {
        let mut entry = BibEntry::new("Key1".to_string(), EntryKind::InProceedings);
        for (name, value) in fields {
            entry.push_field(name.to_string(), value.to_string());
        }
        entry
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(EntryKind::parse("InProceedings"), EntryKind::InProceedings);
        assert_eq!(EntryKind::parse("CONFERENCE"), EntryKind::InProceedings);
        assert_eq!(EntryKind::parse("weird"), EntryKind::Unknown);
    }

    #[test]
    fn field_access_is_case_insensitive() {
        let entry = entry_with(&[("Title", "A Paper"), ("YEAR", "2024")]);
        assert_eq!(entry.get("title"), Some("A Paper"));
        assert_eq!(entry.year(), Some(2024));
    }

    #[test]
    fn title_strips_case_protection() {
        let entry = entry_with(&[("title", "{A} Great {Paper}")]);
        assert_eq!(entry.title().as_deref(), Some("A Great Paper"));
    }

    #[test]
    fn blank_title_is_none() {
        let entry = entry_with(&[("title", "{}")]);
        assert_eq!(entry.title(), None);
    }

    #[test]
    fn author_names_split_in_order() {
        let entry = entry_with(&[("author", "A B and C D and E F")]);
        assert_eq!(entry.author_names(), vec!["A B", "C D", "E F"]);
    }

    #[test]
    fn author_names_absent_is_empty() {
        let entry = entry_with(&[("title", "T")]);
        assert!(entry.author_names().is_empty());
    }

    #[test]
    fn non_numeric_year_is_none() {
        let entry = entry_with(&[("year", "in press")]);
        assert_eq!(entry.year(), None);
    }
}
