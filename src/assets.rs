//! Copy site assets (stylesheet, icons, images) beside a published document.
//!
//! Document pages link their assets by bare file name, so every document
//! directory gets its own copy. Existing files at the destination are never
//! overwritten, and a failed copy only affects that one asset.

use crate::config::AssetsConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// One asset that could not be copied.
#[derive(Error, Debug)]
#[error("could not copy asset {name}: {source}")]
pub struct AssetCopyError {
    pub name: String,
    #[source]
    pub source: io::Error,
}

/// Outcome of copying assets into one directory.
#[derive(Debug, Default)]
pub struct AssetReport {
    /// File names actually copied, sorted.
    pub copied: Vec<String>,
    pub failed: Vec<AssetCopyError>,
}

/// Copy every asset file directly inside `source_dir` into `dest_dir`.
///
/// Assets already present in `dest_dir` are skipped. A missing or unreadable
/// `source_dir` is reported as a single failure rather than an error.
pub fn copy_assets(source_dir: &Path, dest_dir: &Path, config: &AssetsConfig) -> AssetReport {
    let mut report = AssetReport::default();

    let mut sources = match list_assets(source_dir, config) {
        Ok(sources) => sources,
        Err(source) => {
            warn!(dir = %source_dir.display(), error = %source, "cannot list site assets");
            report.failed.push(AssetCopyError {
                name: source_dir.display().to_string(),
                source,
            });
            return report;
        }
    };
    sources.sort();

    for src in sources {
        let Some(name) = src.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let target = dest_dir.join(&name);
        if target.exists() {
            continue;
        }
        match fs::copy(&src, &target) {
            Ok(_) => report.copied.push(name),
            Err(source) => {
                warn!(asset = %name, error = %source, "asset copy failed");
                report.failed.push(AssetCopyError { name, source });
            }
        }
    }

    report
}

fn list_assets(dir: &Path, config: &AssetsConfig) -> io::Result<Vec<PathBuf>> {
    let mut assets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && config.is_asset(&path) {
            assets.push(path);
        }
    }
    Ok(assets)
}
