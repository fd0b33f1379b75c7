//! Strict BibTeX document parser
//!
//! Built on nom. Text outside `@` blocks and `%` line comments is skipped
//! (commentary by BibTeX convention), but a malformed `@` block is fatal:
//! the iterator yields one [`ParseError`] and fuses.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    IResult,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::entry::{BibEntry, EntryKind};

/// A syntactically invalid BibTeX document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed BibTeX near line {line}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}

/// Finite, single-pass iterator over the entries of a BibTeX document.
///
/// `@string` abbreviations are applied as they are defined; `@preamble` and
/// `@comment` blocks are consumed and dropped. Not restartable.
pub struct Entries<'a> {
    remaining: &'a str,
    line: u32,
    abbrevs: HashMap<String, String>,
    failed: bool,
}

impl<'a> Entries<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: input,
            line: 1,
            abbrevs: HashMap::new(),
            failed: false,
        }
    }

    /// Advance past a consumed prefix, keeping the line count current.
    fn advance_to(&mut self, rest: &'a str) {
        let consumed = &self.remaining[..self.remaining.len() - rest.len()];
        self.line += consumed.matches('\n').count() as u32;
        self.remaining = rest;
    }

    /// Skip to the next `@` block, honoring `%` line comments so an `@`
    /// inside one is not mistaken for an entry.
    fn skip_to_next_block(&mut self) {
        let bytes = self.remaining.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            match bytes[pos] {
                b'@' => break,
                b'%' => {
                    while pos < bytes.len() && bytes[pos] != b'\n' {
                        pos += 1;
                    }
                }
                b'\n' => {
                    self.line += 1;
                    pos += 1;
                }
                _ => pos += 1,
            }
        }
        self.remaining = &self.remaining[pos..];
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<BibEntry, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.skip_to_next_block();
            if self.remaining.is_empty() {
                return None;
            }
            match at_block(self.remaining, &self.abbrevs) {
                Ok((rest, block)) => {
                    self.advance_to(rest);
                    match block {
                        Block::Entry(entry) => return Some(Ok(entry)),
                        Block::Abbrev(key, value) => {
                            self.abbrevs.insert(key, value);
                        }
                        Block::Ignored => {}
                    }
                }
                Err(_) => {
                    self.failed = true;
                    return Some(Err(ParseError {
                        line: self.line,
                        message: "unterminated or malformed entry".to_string(),
                    }));
                }
            }
        }
    }
}

/// Parse a whole document.
///
/// The first malformed entry fails the document; no partial list is
/// returned.
pub fn parse_document(input: &str) -> Result<Vec<BibEntry>, ParseError> {
    Entries::new(input).collect()
}

enum Block {
    Entry(BibEntry),
    Abbrev(String, String),
    Ignored,
}

fn at_block<'a>(input: &'a str, abbrevs: &HashMap<String, String>) -> IResult<&'a str, Block> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, keyword) = take_while1(|c: char| c.is_ascii_alphanumeric())(rest)?;
    match keyword.to_ascii_lowercase().as_str() {
        "string" => abbrev_block(rest, abbrevs),
        "preamble" => preamble_block(rest, abbrevs),
        "comment" => comment_block(rest),
        _ => entry_block(rest, keyword, abbrevs),
    }
}

fn abbrev_block<'a>(
    input: &'a str,
    abbrevs: &HashMap<String, String>,
) -> IResult<&'a str, Block> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, key) = identifier(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, value) = field_value(rest, abbrevs)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;
    Ok((rest, Block::Abbrev(key.to_string(), value)))
}

fn preamble_block<'a>(
    input: &'a str,
    abbrevs: &HashMap<String, String>,
) -> IResult<&'a str, Block> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = field_value(rest, abbrevs)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('}')(rest)?;
    Ok((rest, Block::Ignored))
}

fn comment_block(input: &str) -> IResult<&str, Block> {
    let (rest, _) = multispace0(input)?;
    if rest.starts_with('{') {
        let (rest, _) = balanced(rest)?;
        Ok((rest, Block::Ignored))
    } else {
        let pos = rest.find('\n').unwrap_or(rest.len());
        Ok((&rest[pos..], Block::Ignored))
    }
}

fn entry_block<'a>(
    input: &'a str,
    keyword: &str,
    abbrevs: &HashMap<String, String>,
) -> IResult<&'a str, Block> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = char('{')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, cite_key) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:./+".contains(c))(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (mut remaining, _) = opt(char(','))(rest)?;

    let mut entry = BibEntry::new(cite_key.to_string(), EntryKind::parse(keyword));
    loop {
        let (rest, _) = multispace0(remaining)?;
        if let Some(after) = rest.strip_prefix('}') {
            return Ok((after, Block::Entry(entry)));
        }
        let (rest, name) = identifier(rest)?;
        let (rest, _) = multispace0(rest)?;
        let (rest, _) = char('=')(rest)?;
        let (rest, value) = field_value(rest, abbrevs)?;
        entry.push_field(name.to_string(), value);
        let (rest, _) = multispace0(rest)?;
        remaining = rest.strip_prefix(',').unwrap_or(rest);
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

/// A field value: braced, quoted, bare number, or abbreviation reference,
/// with `#` concatenation between parts.
fn field_value<'a>(input: &'a str, abbrevs: &HashMap<String, String>) -> IResult<&'a str, String> {
    let mut value = String::new();
    let mut remaining = input;
    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, part) = alt((
            map(balanced, str::to_string),
            quoted,
            map(take_while1(|c: char| c.is_ascii_digit()), str::to_string),
            map(identifier, |name| {
                abbrevs
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| name.to_string())
            }),
        ))(rest)?;
        value.push_str(&part);
        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix('#') {
            Some(after) => remaining = after,
            None => return Ok((rest, value)),
        }
    }
}

/// Consume a `{...}` group with arbitrary nesting, returning the inner text.
fn balanced(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[pos + 1..], &input[1..pos]));
                }
            }
            b'\\' => pos += 1,
            _ => {}
        }
        pos += 1;
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Consume a `"..."` value. Braces protect embedded quotes; backslash
/// escapes are kept verbatim.
fn quoted(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    }
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '"' if depth == 0 => return Ok((&input[i + 1..], input[1..i].to_string())),
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_entry() {
        let input = r#"
@inproceedings{Smith2024,
    author = {John Smith},
    title = {A Great Paper},
    booktitle = {ACME Conf},
    year = {2024},
    pages = {101--110},
}
"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.cite_key, "Smith2024");
        assert_eq!(entry.kind, EntryKind::InProceedings);
        assert_eq!(entry.get("author"), Some("John Smith"));
        assert_eq!(entry.venue().as_deref(), Some("ACME Conf"));
        assert_eq!(entry.year(), Some(2024));
        assert_eq!(entry.pages(), Some("101--110"));
    }

    #[test]
    fn parse_multiple_entries_in_order() {
        let input = r#"
@article{First, title = {One}}
@book{Second, title = {Two}}
@misc{Third, title = {Three}}
"#;
        let entries = parse_document(input).unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.cite_key.as_str()).collect();
        assert_eq!(keys, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn parse_quoted_and_numeric_values() {
        let input = r#"@article{Test, title = "Quoted Title", year = 2024}"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries[0].get("title"), Some("Quoted Title"));
        assert_eq!(entries[0].year(), Some(2024));
    }

    #[test]
    fn nested_braces_are_preserved_in_raw_value() {
        let input = r#"@article{Test, title = {A {B}ook about {LaTeX}}}"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries[0].get("title"), Some("A {B}ook about {LaTeX}"));
        assert_eq!(entries[0].title().as_deref(), Some("A Book about LaTeX"));
    }

    #[test]
    fn abbrev_definition_and_concatenation() {
        let input = r#"
@string{acme = "ACME"}
@inproceedings{Test, booktitle = acme # { Conf}}
"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries[0].get("booktitle"), Some("ACME Conf"));
    }

    #[test]
    fn preamble_and_comment_blocks_are_dropped() {
        let input = r#"
@preamble{ {\newcommand{\noop}[1]{}} }
@comment{scratch notes}
@article{Only, title = {T}}
"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cite_key, "Only");
    }

    #[test]
    fn text_outside_blocks_is_commentary() {
        let input = r#"
This file was exported by hand.
% an @article reference inside a line comment
@article{Real, title = {T}}
"#;
        let entries = parse_document(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cite_key, "Real");
    }

    #[test]
    fn malformed_entry_fails_the_document() {
        let input = "@article{Bad, title = {Unterminated";
        let err = parse_document(input).unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn error_reports_the_failing_line() {
        let input = "@article{Ok, title = {T}}\n\n@article{Bad, title = {Oops";
        let err = parse_document(input).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn iterator_fuses_after_failure() {
        let input = "@article{Ok, title = {T}}\n@article{Bad, title = {Oops";
        let mut entries = Entries::new(input);
        assert!(matches!(entries.next(), Some(Ok(_))));
        assert!(matches!(entries.next(), Some(Err(_))));
        assert!(entries.next().is_none());
    }
}
