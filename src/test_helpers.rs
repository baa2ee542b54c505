//! Shared test utilities for the rat-press test suite.
//!
//! Builds document stores on disk and canned submissions so module tests
//! can exercise the scanner, index builders and publisher against real
//! files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let content = tmp.path().join("Content");
//! write_document(&content, "Albums/2024/03/LPOne.html", &doc_fields("LP One", "2024-03-05"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::metadata::{MetadataKey, MetadataRecord};
use crate::types::{DocumentSubmission, PublishedDocument};

// =========================================================================
// Store fixtures
// =========================================================================

/// Metadata for a review of `album` published on `date` (`YYYY-MM-DD`).
pub fn doc_fields(album: &str, date: &str) -> MetadataRecord {
    MetadataRecord::new()
        .with(MetadataKey::Title, format!("Review of {album}"))
        .with(MetadataKey::Artist, "X")
        .with(MetadataKey::Album, album)
        .with(MetadataKey::Year, "1999")
        .with(MetadataKey::Type, "Albums")
        .with(MetadataKey::Author, "Ape")
        .with(MetadataKey::Date, date)
}

/// Write a document with `record` as its metadata block under `root`.
pub fn write_document(root: &Path, relative: &str, record: &MetadataRecord) -> PathBuf {
    let body = format!(
        "{}<!DOCTYPE html>\n<html><body><p>{}</p></body></html>\n",
        record.to_block(),
        record.get(MetadataKey::Title).unwrap_or_default()
    );
    write_raw(root, relative, &body)
}

/// Write arbitrary contents under `root`, creating parent directories.
pub fn write_raw(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

// =========================================================================
// In-memory documents
// =========================================================================

/// A scanned document for `album` on the given date.
pub fn published(album: &str, y: i32, m: u32, d: u32) -> PublishedDocument {
    PublishedDocument {
        relative_path: format!("Albums/{y:04}/{m:02}/{album}.html"),
        doc_type: "Albums".to_string(),
        artist: "X".to_string(),
        album: album.to_string(),
        year: "1999".to_string(),
        publish_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        author: "Ape".to_string(),
        title: format!("Review of {album}"),
    }
}

/// Albums in the order they appear.
pub fn albums(docs: &[PublishedDocument]) -> Vec<&str> {
    docs.iter().map(|d| d.album.as_str()).collect()
}

// =========================================================================
// Submissions
// =========================================================================

/// The worked example: "Review A" of "LP One" by X, dated 2024-03-05.
pub fn sample_submission() -> DocumentSubmission {
    DocumentSubmission {
        title: "Review A".to_string(),
        artist: "X".to_string(),
        album: "LP One".to_string(),
        release_year: "1999".to_string(),
        doc_type: "Albums".to_string(),
        author: "Ape".to_string(),
        publish_date: Some("2024-03-05".to_string()),
        body: "Loud and **very** good.\n\n+++\n\nWould listen again.".to_string(),
    }
}

/// A submission for `album` with an explicit date.
pub fn submission_for(album: &str, date: &str) -> DocumentSubmission {
    DocumentSubmission {
        title: format!("Review of {album}"),
        album: album.to_string(),
        publish_date: Some(date.to_string()),
        ..sample_submission()
    }
}
