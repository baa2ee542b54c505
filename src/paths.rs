//! Where a document lands in the store.
//!
//! Every document is filed by type, year and month:
//!
//! ```text
//! Content/
//! └── Albums/              # sanitized type
//!     └── 2024/
//!         └── 03/          # zero-padded month
//!             └── LPOne.html
//! ```
//!
//! ## Sanitizing
//!
//! A "word character" is any Unicode alphanumeric or `_`.
//!
//! - Type folder: every character that is not a word character or `-`
//!   becomes `_`. `Live Shows!` → `Live_Shows_`.
//! - File name: whitespace is dropped, then every character that is not a
//!   word character or `-` is dropped. `LP One` → `LPOne`.
//!
//! ## Collisions
//!
//! Re-publishing the same album in the same month resolves to the same file.
//! [`CollisionPolicy`] decides what happens then.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// File extension of every document in the store.
pub const DOCUMENT_EXTENSION: &str = "html";

/// What to do when the resolved document file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file (edit in place).
    #[default]
    Overwrite,
    /// Refuse with an `AlreadyExists` I/O error.
    Fail,
    /// Append `-2`, `-3`, ... to the stem until the name is free.
    Version,
}

/// Output location of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// `<root>/<type>/<year>/<month>`
    pub dir: PathBuf,
    /// `dir` plus the file name.
    pub file: PathBuf,
    /// Path from the store root with forward slashes.
    pub relative: String,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Filesystem-safe folder token for a document type.
pub fn sanitize_type(doc_type: &str) -> String {
    doc_type
        .chars()
        .map(|c| if is_word_char(c) || c == '-' { c } else { '_' })
        .collect()
}

/// File stem for a document name. May be empty when nothing survives.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| is_word_char(c) || c == '-')
        .collect()
}

/// Compute the output location without touching the filesystem.
pub fn plan(root: &Path, doc_type: &str, date: NaiveDate, name: &str) -> ResolvedPath {
    let folder = sanitize_type(doc_type);
    let year = format!("{:04}", date.year());
    let month = format!("{:02}", date.month());
    let file_name = format!("{}.{}", sanitize_filename(name), DOCUMENT_EXTENSION);

    let dir = root.join(&folder).join(&year).join(&month);
    ResolvedPath {
        file: dir.join(&file_name),
        relative: format!("{folder}/{year}/{month}/{file_name}"),
        dir,
    }
}

/// Compute the output location, create its directory and apply `policy`
/// against any file already there.
pub fn resolve(
    root: &Path,
    doc_type: &str,
    date: NaiveDate,
    name: &str,
    policy: CollisionPolicy,
) -> io::Result<ResolvedPath> {
    let planned = plan(root, doc_type, date, name);
    std::fs::create_dir_all(&planned.dir)?;

    if !planned.file.exists() {
        return Ok(planned);
    }
    match policy {
        CollisionPolicy::Overwrite => Ok(planned),
        CollisionPolicy::Fail => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", planned.relative),
        )),
        CollisionPolicy::Version => Ok(next_free_version(planned, name)),
    }
}

fn next_free_version(planned: ResolvedPath, name: &str) -> ResolvedPath {
    let stem = sanitize_filename(name);
    let parent = planned
        .relative
        .rsplit_once('/')
        .map(|(parent, _)| parent.to_string())
        .unwrap_or_default();

    let mut n = 2u32;
    loop {
        let file_name = format!("{stem}-{n}.{DOCUMENT_EXTENSION}");
        let file = planned.dir.join(&file_name);
        if !file.exists() {
            return ResolvedPath {
                file,
                relative: format!("{parent}/{file_name}"),
                dir: planned.dir,
            };
        }
        n += 1;
    }
}
