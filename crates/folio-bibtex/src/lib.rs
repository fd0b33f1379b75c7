//! BibTeX document parsing for the folio importer
//!
//! A nom-based reader for standard BibTeX:
//! - all entry types, braced and quoted field values, nested braces
//! - `@string` abbreviations with `#` concatenation
//! - `@preamble` and `@comment` blocks, `%` line comments
//!
//! Unlike a recovering reference manager, this parser is strict: the import
//! workflow must never act on a partial entry list, so the first malformed
//! entry fails the whole document with a [`ParseError`].

mod entry;
pub mod parser;

pub use entry::{BibEntry, EntryKind, Field};
pub use parser::{parse_document, Entries, ParseError};
