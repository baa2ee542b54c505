//! Shared types passed between the publisher, the scanner and the index
//! builders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One document as collected by the input form.
///
/// Every field is a raw string; trimming, defaults and validation happen in
/// [`crate::publish`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSubmission {
    /// Review headline. Required.
    pub title: String,
    pub artist: String,
    /// Album or work name. Required; also names the output file.
    pub album: String,
    pub release_year: String,
    /// Review type (`Albums`, `Tracks`, `Essays`, ...). Picks the store folder.
    pub doc_type: String,
    /// Signature shown on the page.
    pub author: String,
    /// Explicit `YYYY-MM-DD` publish date. Today when absent.
    pub publish_date: Option<String>,
    /// Markdown body.
    pub body: String,
}

/// A document reconstructed from the store by the scanner.
///
/// Built fresh on every scan and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedDocument {
    /// Path from the store root, forward slashes
    /// (e.g. `Albums/2024/03/LPOne.html`).
    pub relative_path: String,
    pub doc_type: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub publish_date: NaiveDate,
    pub author: String,
    pub title: String,
}
