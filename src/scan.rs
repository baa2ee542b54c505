//! Document store scanning.
//!
//! Walks every `.html` file under the store root and turns the ones carrying
//! a usable metadata block into [`PublishedDocument`]s. This is the only way
//! the index builders learn about documents; nothing else is persisted.
//!
//! ## Resilience
//!
//! The scan never fails as a whole. Per file:
//!
//! - unreadable file or directory entry → skipped
//! - no metadata block → skipped (plain HTML, not a document)
//! - missing or unparseable `DATE` → skipped
//!
//! Each skip is logged at debug level.
//!
//! ## Ordering
//!
//! Directories are walked in file name order. Callers sort by date; the
//! walk order only breaks ties.

use crate::metadata::{self, MetadataKey};
use crate::paths::DOCUMENT_EXTENSION;
use crate::types::PublishedDocument;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Date format of the `DATE` key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read-only view of the document store.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    default_type: String,
}

impl Store {
    /// `default_type` fills in documents whose block has no `TYPE`.
    pub fn new(root: impl Into<PathBuf>, default_type: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_type: default_type.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every valid document in the store.
    ///
    /// Each call starts a fresh walk, so the sequence can be restarted. A
    /// missing store root yields nothing. Entries are visited in file name
    /// order, so documents sharing a date always come out the same way.
    pub fn documents(&self) -> impl Iterator<Item = PublishedDocument> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable store entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_document_file(entry.path()))
            .filter_map(move |entry| self.load(entry.path()))
    }

    /// Collect [`Store::documents`] into a vector.
    pub fn scan_all(&self) -> Vec<PublishedDocument> {
        self.documents().collect()
    }

    fn load(&self, path: &Path) -> Option<PublishedDocument> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };
        let relative = relative_path(&self.root, path)?;
        let doc = document_from_contents(&contents, relative, &self.default_type);
        if doc.is_none() {
            debug!(path = %path.display(), "skipping file without a dated metadata block");
        }
        doc
    }
}

fn is_document_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

/// `path` relative to `root`, joined with forward slashes.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Parse the `DATE` value of a metadata block.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Build a document from file contents, or `None` if the file carries no
/// metadata block or no valid `DATE`.
pub fn document_from_contents(
    contents: &str,
    relative_path: String,
    default_type: &str,
) -> Option<PublishedDocument> {
    let record = metadata::parse(contents)?;
    let publish_date = parse_date(record.get(MetadataKey::Date)?)?;

    Some(PublishedDocument {
        relative_path,
        doc_type: record.get_or(MetadataKey::Type, default_type).to_string(),
        artist: record.get_or(MetadataKey::Artist, "").to_string(),
        album: record.get_or(MetadataKey::Album, "").to_string(),
        year: record.get_or(MetadataKey::Year, "").to_string(),
        publish_date,
        author: record.get_or(MetadataKey::Author, "").to_string(),
        title: record.get_or(MetadataKey::Title, "").to_string(),
    })
}
