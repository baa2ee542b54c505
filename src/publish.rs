//! Publishing a document and regenerating the indexes.
//!
//! [`Publisher::publish`] runs the whole pipeline for one submission:
//!
//! ```text
//! validate → resolve date → resolve path → render body + metadata block
//!          → atomic write → copy assets → rescan store → Archive + Recent
//! ```
//!
//! Validation and date errors happen before anything touches the disk. A
//! failed document write stops the pipeline, so the indexes never describe a
//! half-written store. Asset copy failures are collected in the result.
//! Index pages are always rebuilt from a full rescan; see
//! [`rebuild_indexes`].

use crate::archive::ArchiveIndex;
use crate::assets::{self, AssetCopyError};
use crate::markup;
use crate::metadata::{self, MetadataKey, MetadataRecord};
use crate::paths;
use crate::recent::RecentIndex;
use crate::render::{self, DocumentPage, PageContext};
use crate::scan::{DATE_FORMAT, Store};
use crate::site::{self, Site};
use crate::types::DocumentSubmission;
use chrono::{Datelike, Local, NaiveDate};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{0}")]
    Validation(String),
    #[error("Date must be YYYY-MM-DD format, got {input:?}")]
    DateFormat { input: String },
    #[error("Could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse error category shown to the person publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DateFormat,
    Io,
}

impl PublishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PublishError::Validation(_) => ErrorKind::Validation,
            PublishError::DateFormat { .. } => ErrorKind::DateFormat,
            PublishError::Io { .. } => ErrorKind::Io,
        }
    }

    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PublishError::Io {
            path: path.into(),
            source,
        }
    }
}

/// What a successful publish did.
#[derive(Debug)]
pub struct PublishResult {
    /// Absolute path of the written document.
    pub path: PathBuf,
    /// Path from the store root (`Albums/2024/03/LPOne.html`).
    pub relative_path: String,
    pub publish_date: NaiveDate,
    /// Asset file names copied next to the document.
    pub copied_assets: Vec<String>,
    pub asset_errors: Vec<AssetCopyError>,
    pub index: IndexReport,
}

/// What an index rebuild wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Documents found by the scan (all of them are in the Archive).
    pub documents: usize,
    /// Entries on the Recent page.
    pub recent: usize,
    pub archive_path: PathBuf,
    pub recent_path: PathBuf,
}

/// Publishes documents into one site.
pub struct Publisher<'a> {
    site: &'a Site,
}

impl<'a> Publisher<'a> {
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Publish with today's local date as the default publish date.
    pub fn publish(&self, submission: &DocumentSubmission) -> Result<PublishResult, PublishError> {
        self.publish_on(submission, Local::now().date_naive())
    }

    /// Publish with `today` as the default publish date and copyright year.
    pub fn publish_on(
        &self,
        submission: &DocumentSubmission,
        today: NaiveDate,
    ) -> Result<PublishResult, PublishError> {
        let config = &self.site.config;
        let doc = prepare(submission, &config.documents.default_type, &config.documents.default_author)?;
        let date = resolve_date(submission.publish_date.as_deref(), today)?;

        let content_root = self.site.content_root();
        let planned = paths::plan(&content_root, &doc.doc_type, date, &doc.album);
        let resolved = paths::resolve(
            &content_root,
            &doc.doc_type,
            date,
            &doc.album,
            config.documents.collision,
        )
        .map_err(|e| PublishError::io(&planned.file, e))?;

        let ctx = PageContext::new(self.site, today.year());
        let date_text = date.format(DATE_FORMAT).to_string();
        let body_html = markup::render_body(&doc.body);
        let page = render::render_document(
            &ctx,
            &DocumentPage {
                title: &doc.title,
                artist: &doc.artist,
                album: &doc.album,
                release_year: &doc.release_year,
                author: &doc.author,
                publish_date: &date_text,
                body_html: &body_html,
            },
        );

        let record = MetadataRecord::new()
            .with(MetadataKey::Title, doc.title.as_str())
            .with(MetadataKey::Artist, doc.artist.as_str())
            .with(MetadataKey::Album, doc.album.as_str())
            .with(MetadataKey::Year, doc.release_year.as_str())
            .with(MetadataKey::Type, doc.doc_type.as_str())
            .with(MetadataKey::Author, doc.author.as_str())
            .with(MetadataKey::Date, date_text.as_str());
        let mut contents = record.to_block();
        contents.push_str(&page.into_string());

        site::write_atomic(&resolved.file, &contents)
            .map_err(|e| PublishError::io(&resolved.file, e))?;
        info!(path = %resolved.relative, "document written");

        let assets = assets::copy_assets(&self.site.assets_root(), &resolved.dir, &config.assets);
        let index = rebuild_indexes(self.site, &ctx)?;

        Ok(PublishResult {
            path: resolved.file,
            relative_path: resolved.relative,
            publish_date: date,
            copied_assets: assets.copied,
            asset_errors: assets.failed,
            index,
        })
    }
}

/// Rescan the whole store and rewrite both index pages.
///
/// Never incremental: the pages are a pure function of the store, so
/// running this with no store change reproduces the same bytes.
pub fn rebuild_indexes(site: &Site, ctx: &PageContext) -> Result<IndexReport, PublishError> {
    let store = Store::new(site.content_root(), site.config.documents.default_type.clone());
    let docs = store.scan_all();
    let documents = docs.len();

    let recent = RecentIndex::build(docs.clone(), site.config.index.recent_limit);
    let archive = ArchiveIndex::build(docs);

    let archive_path = site.archive_path();
    site::write_atomic(&archive_path, &archive.render(ctx).into_string())
        .map_err(|e| PublishError::io(&archive_path, e))?;

    let recent_path = site.recent_path();
    site::write_atomic(&recent_path, &recent.render(ctx).into_string())
        .map_err(|e| PublishError::io(&recent_path, e))?;

    info!(documents, recent = recent.entries.len(), "indexes rebuilt");
    Ok(IndexReport {
        documents,
        recent: recent.entries.len(),
        archive_path,
        recent_path,
    })
}

/// A submission after trimming and defaults.
struct Prepared {
    title: String,
    artist: String,
    album: String,
    release_year: String,
    doc_type: String,
    author: String,
    body: String,
}

fn prepare(
    submission: &DocumentSubmission,
    default_type: &str,
    default_author: &str,
) -> Result<Prepared, PublishError> {
    let or_default = |value: &str, default: &str| {
        let value = value.trim();
        let chosen = if value.is_empty() { default } else { value };
        chosen.to_string()
    };

    let doc = Prepared {
        title: submission.title.trim().to_string(),
        artist: submission.artist.trim().to_string(),
        album: submission.album.trim().to_string(),
        release_year: submission.release_year.trim().to_string(),
        doc_type: or_default(&submission.doc_type, default_type),
        author: or_default(&submission.author, default_author),
        body: submission.body.trim().to_string(),
    };

    if doc.title.is_empty() || doc.album.is_empty() {
        return Err(PublishError::Validation(
            "Title and Album are required.".into(),
        ));
    }
    for (label, value) in [
        ("Title", &doc.title),
        ("Artist", &doc.artist),
        ("Album", &doc.album),
        ("Release year", &doc.release_year),
        ("Type", &doc.doc_type),
        ("Author", &doc.author),
    ] {
        if metadata::contains_delimiter(value) {
            return Err(PublishError::Validation(format!(
                "{label} must not contain \"{}\" or \"{}\".",
                metadata::OPEN,
                metadata::CLOSE
            )));
        }
    }
    if paths::sanitize_filename(&doc.album).is_empty() {
        return Err(PublishError::Validation(
            "Album needs at least one letter or digit to name the file.".into(),
        ));
    }
    Ok(doc)
}

/// The explicit override if one was given, otherwise `today`.
///
/// The override must be exactly `YYYY-MM-DD` (zero-padded) and a real date.
fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, PublishError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(today);
    };
    let date_format_error = || PublishError::DateFormat {
        input: raw.to_string(),
    };
    if !has_iso_shape(raw) {
        return Err(date_format_error());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| date_format_error())
}

fn has_iso_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::paths::CollisionPolicy;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn setup() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::with_config(tmp.path(), SiteConfig::default());
        (tmp, site)
    }

    #[test]
    fn publishes_worked_example() {
        let (_tmp, site) = setup();
        let result = Publisher::new(&site)
            .publish_on(&sample_submission(), today())
            .unwrap();

        assert_eq!(result.relative_path, "Albums/2024/03/LPOne.html");
        assert_eq!(
            result.path,
            site.content_root().join("Albums").join("2024").join("03").join("LPOne.html")
        );

        let contents = fs::read_to_string(&result.path).unwrap();
        assert!(contents.starts_with("<!--\nTITLE: Review A\n"));
        assert!(contents.contains("DATE: 2024-03-05\n-->\n<!DOCTYPE html>"));
        assert!(contents.contains("<b>very</b>"));
        assert!(contents.contains("<br>"));

        let recent = fs::read_to_string(site.recent_path()).unwrap();
        assert!(recent.contains("5.3.2024"));
        let archive = fs::read_to_string(site.archive_path()).unwrap();
        assert!(archive.contains("Content/Albums/2024/03/LPOne.html"));
        assert_eq!(result.index.documents, 1);
        assert_eq!(result.index.recent, 1);
    }

    #[test]
    fn missing_required_fields_fail_without_side_effects() {
        let (_tmp, site) = setup();
        let mut submission = sample_submission();
        submission.album = "   ".to_string();

        let err = Publisher::new(&site).publish_on(&submission, today()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!site.content_root().exists());
        assert!(!site.archive_path().exists());
    }

    #[test]
    fn bad_override_date_fails_without_side_effects() {
        let (_tmp, site) = setup();
        for bad in ["2024-3-5", "05.03.2024", "2024-02-30", "yesterday"] {
            let mut submission = sample_submission();
            submission.publish_date = Some(bad.to_string());
            let err = Publisher::new(&site).publish_on(&submission, today()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DateFormat, "{bad}");
        }
        assert!(!site.content_root().exists());
        assert!(!site.recent_path().exists());
    }

    #[test]
    fn missing_date_uses_today() {
        let (_tmp, site) = setup();
        let mut submission = sample_submission();
        submission.publish_date = None;
        let result = Publisher::new(&site).publish_on(&submission, today()).unwrap();
        assert_eq!(result.publish_date, today());
        assert_eq!(result.relative_path, "Albums/2024/06/LPOne.html");
    }

    #[test]
    fn blank_type_and_author_use_defaults() {
        let (_tmp, site) = setup();
        let mut submission = sample_submission();
        submission.doc_type = " ".to_string();
        submission.author = String::new();

        let result = Publisher::new(&site).publish_on(&submission, today()).unwrap();

        assert_eq!(result.relative_path, "General/2024/03/LPOne.html");
        let contents = fs::read_to_string(&result.path).unwrap();
        assert!(contents.contains("TYPE: General\n"));
        assert!(contents.contains("AUTHOR: Ape\n"));
    }

    #[test]
    fn delimiter_in_field_is_rejected() {
        let (_tmp, site) = setup();
        let mut submission = sample_submission();
        submission.artist = "The --> Band".to_string();
        let err = Publisher::new(&site).publish_on(&submission, today()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn album_without_filename_chars_is_rejected() {
        let (_tmp, site) = setup();
        let mut submission = sample_submission();
        submission.album = "?!".to_string();
        let err = Publisher::new(&site).publish_on(&submission, today()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn write_failure_skips_index_rebuild() {
        let (tmp, site) = setup();
        // A plain file where the store directory should be.
        fs::write(tmp.path().join("Content"), "not a directory").unwrap();

        let err = Publisher::new(&site)
            .publish_on(&sample_submission(), today())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!site.archive_path().exists());
        assert!(!site.recent_path().exists());
    }

    #[test]
    fn copies_assets_once() {
        let (tmp, site) = setup();
        fs::write(tmp.path().join("rat.css"), "body {}").unwrap();

        let first = Publisher::new(&site)
            .publish_on(&submission_for("LP One", "2024-03-05"), today())
            .unwrap();
        assert_eq!(first.copied_assets, ["rat.css"]);
        assert!(first.asset_errors.is_empty());
        assert!(site.content_root().join("Albums/2024/03/rat.css").exists());

        let second = Publisher::new(&site)
            .publish_on(&submission_for("LP Two", "2024-03-09"), today())
            .unwrap();
        assert!(second.copied_assets.is_empty());
    }

    #[test]
    fn republish_overwrites_by_default() {
        let (_tmp, site) = setup();
        let publisher = Publisher::new(&site);
        publisher.publish_on(&sample_submission(), today()).unwrap();

        let mut edited = sample_submission();
        edited.title = "Review A, revised".to_string();
        let result = publisher.publish_on(&edited, today()).unwrap();

        assert_eq!(result.index.documents, 1);
        let contents = fs::read_to_string(&result.path).unwrap();
        assert!(contents.contains("TITLE: Review A, revised"));
    }

    #[test]
    fn fail_policy_keeps_existing_document() {
        let (tmp, _) = setup();
        let mut config = SiteConfig::default();
        config.documents.collision = CollisionPolicy::Fail;
        let site = Site::with_config(tmp.path(), config);
        let publisher = Publisher::new(&site);
        publisher.publish_on(&sample_submission(), today()).unwrap();

        let err = publisher.publish_on(&sample_submission(), today()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        match err {
            PublishError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn version_policy_keeps_both_documents() {
        let (tmp, _) = setup();
        let mut config = SiteConfig::default();
        config.documents.collision = CollisionPolicy::Version;
        let site = Site::with_config(tmp.path(), config);
        let publisher = Publisher::new(&site);
        publisher.publish_on(&sample_submission(), today()).unwrap();

        let second = publisher.publish_on(&sample_submission(), today()).unwrap();
        assert_eq!(second.relative_path, "Albums/2024/03/LPOne-2.html");
        assert_eq!(second.index.documents, 2);
    }

    #[test]
    fn rebuild_ignores_inert_files() {
        let (_tmp, site) = setup();
        let content = site.content_root();
        write_document(&content, "Albums/2024/03/LPOne.html", &doc_fields("LP One", "2024-03-05"));
        write_raw(&content, "Albums/2024/03/About.html", "<html>no block</html>");
        write_raw(&content, "Albums/2024/03/Bad.html", "<!--\nALBUM: Bad\nDATE: not-a-date\n-->");

        let ctx = PageContext::new(&site, 2024);
        let report = rebuild_indexes(&site, &ctx).unwrap();

        assert_eq!(report.documents, 1);
        let archive = fs::read_to_string(&report.archive_path).unwrap();
        assert!(!archive.contains("Bad"));
    }

    #[test]
    fn iso_shape_check() {
        assert!(has_iso_shape("2024-03-05"));
        assert!(!has_iso_shape("2024-3-05"));
        assert!(!has_iso_shape("2024/03/05"));
        assert!(!has_iso_shape("２０２４-03-05"));
    }
}
