//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines, for testability,
//! and a `print_*` wrapper that writes them to stdout. Format functions are
//! pure. Diagnostics go through `tracing` to stderr instead.
//!
//! # Output Format
//!
//! ## Publish
//!
//! ```text
//! Published Review A
//!     File: Albums/2024/03/LPOne.html
//!     Date: 5.3.2024
//!     Assets copied: favicon.ico, rat.css
//!     Asset failed: tiles.png (permission denied)
//! Indexes: 14 documents, 13 recent
//! ```
//!
//! ## Scan
//!
//! ```text
//! 001 2024-03-05 [Albums] LP One - X (1999)
//!     Source: Albums/2024/03/LPOne.html
//!
//! 1 document
//! ```

use crate::publish::{IndexReport, PublishResult};
use crate::recent::display_date;
use crate::types::PublishedDocument;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn index_line(index: &IndexReport) -> String {
    format!(
        "Indexes: {}, {} recent",
        plural(index.documents, "document"),
        index.recent
    )
}

// ============================================================================
// Publish
// ============================================================================

/// Format the result of a publish for the person who submitted it.
pub fn format_publish_output(title: &str, result: &PublishResult) -> Vec<String> {
    let mut lines = vec![
        format!("Published {title}"),
        format!("    File: {}", result.relative_path),
        format!("    Date: {}", display_date(result.publish_date)),
    ];

    if result.copied_assets.is_empty() {
        lines.push("    No new assets to copy".to_string());
    } else {
        lines.push(format!(
            "    Assets copied: {}",
            result.copied_assets.join(", ")
        ));
    }
    for failure in &result.asset_errors {
        lines.push(format!("    Asset failed: {} ({})", failure.name, failure.source));
    }

    lines.push(index_line(&result.index));
    lines
}

pub fn print_publish_output(title: &str, result: &PublishResult) {
    for line in format_publish_output(title, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Reindex
// ============================================================================

pub fn format_reindex_output(index: &IndexReport, root: &Path) -> Vec<String> {
    let display = |path: &Path| {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    };
    vec![
        format!("Archive → {}", display(&index.archive_path)),
        format!("Recent → {}", display(&index.recent_path)),
        index_line(index),
    ]
}

pub fn print_reindex_output(index: &IndexReport, root: &Path) {
    for line in format_reindex_output(index, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format scanned documents, in the order given.
pub fn format_scan_output(docs: &[PublishedDocument]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, doc) in docs.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}] {} - {} ({})",
            format_index(i + 1),
            doc.publish_date,
            doc.doc_type,
            doc.album,
            doc.artist,
            doc.year
        ));
        lines.push(format!("    Source: {}", doc.relative_path));
    }
    if !docs.is_empty() {
        lines.push(String::new());
    }
    lines.push(plural(docs.len(), "document"));
    lines
}

pub fn print_scan_output(docs: &[PublishedDocument]) {
    for line in format_scan_output(docs) {
        println!("{}", line);
    }
}
