//! The metadata block embedded at the top of every published document.
//!
//! Documents are their own database: each file starts with an HTML comment
//! holding the descriptive fields as `KEY: value` lines.
//!
//! ```text
//! <!--
//! TITLE: Review A
//! ARTIST: X
//! ALBUM: LP One
//! YEAR: 1999
//! TYPE: Albums
//! AUTHOR: Ape
//! DATE: 2024-03-05
//! -->
//! <!DOCTYPE html>
//! ...
//! ```
//!
//! The index builders rebuild everything from these blocks, so the codec is
//! kept apart from page rendering. Encoding and decoding live here; the page
//! template lives in [`crate::render`].
//!
//! ## Parsing rules
//!
//! - The first `<!--` ... `-->` pair in the file is the block. No pair means
//!   the file is not a document and [`parse`] returns `None`.
//! - Each interior line is split on its first colon; key and value are
//!   trimmed. Lines without a colon are ignored.
//! - Any subset of keys is accepted. Only `DATE` matters to the scanner.

use std::collections::BTreeMap;

pub const OPEN: &str = "<!--";
pub const CLOSE: &str = "-->";

/// The fixed keys written into every block, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetadataKey {
    Title,
    Artist,
    Album,
    Year,
    Type,
    Author,
    Date,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 7] = [
        MetadataKey::Title,
        MetadataKey::Artist,
        MetadataKey::Album,
        MetadataKey::Year,
        MetadataKey::Type,
        MetadataKey::Author,
        MetadataKey::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataKey::Title => "TITLE",
            MetadataKey::Artist => "ARTIST",
            MetadataKey::Album => "ALBUM",
            MetadataKey::Year => "YEAR",
            MetadataKey::Type => "TYPE",
            MetadataKey::Author => "AUTHOR",
            MetadataKey::Date => "DATE",
        }
    }
}

/// Key/value record decoded from, or destined for, a metadata block.
///
/// Parsing keeps every key it finds, including ones outside
/// [`MetadataKey::ALL`]; encoding only ever writes the fixed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    fields: BTreeMap<String, String>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one of the fixed keys.
    pub fn with(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.fields.insert(key.as_str().to_string(), value.into());
    }

    pub fn get(&self, key: MetadataKey) -> Option<&str> {
        self.fields.get(key.as_str()).map(String::as_str)
    }

    /// Value for `key`, or `default` when the block did not carry it.
    pub fn get_or<'a>(&'a self, key: MetadataKey, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Raw lookup, including keys outside the fixed set.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Encode as a metadata block.
    ///
    /// All seven keys are written in fixed order; a key never set is written
    /// with an empty value. Line breaks inside a value are folded to single
    /// spaces so every key stays on its own line.
    pub fn to_block(&self) -> String {
        let mut block = String::from(OPEN);
        block.push('\n');
        for key in MetadataKey::ALL {
            let value = fold_lines(self.get(key).unwrap_or(""));
            block.push_str(key.as_str());
            block.push_str(": ");
            block.push_str(&value);
            block.push('\n');
        }
        block.push_str(CLOSE);
        block.push('\n');
        block
    }
}

fn fold_lines(value: &str) -> String {
    if value.contains(['\n', '\r']) {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        value.to_string()
    }
}

/// Whether a field value would break out of the block it is written into.
pub fn contains_delimiter(value: &str) -> bool {
    value.contains(OPEN) || value.contains(CLOSE)
}

/// Decode the first metadata block found in `contents`.
///
/// Returns `None` when there is no complete `<!--` / `-->` pair; that marks
/// a non-document file rather than an error.
pub fn parse(contents: &str) -> Option<MetadataRecord> {
    let start = contents.find(OPEN)? + OPEN.len();
    let len = contents[start..].find(CLOSE)?;
    let interior = &contents[start..start + len];

    let fields = interior
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect();

    Some(MetadataRecord { fields })
}
