//! Site configuration module.
//!
//! Handles loading, validating, and merging the optional `config.toml` that
//! sits at the site root. Stock defaults are the base layer; the user file
//! overrides only the keys it names.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Optional, overrides stock defaults
//! ├── rat.css                  # Site assets, copied beside every document
//! ├── favicon.ico
//! ├── Archive.html             # Generated
//! ├── Recent.html              # Generated
//! └── Content/                 # Document store
//!     └── Albums/2024/03/LPOne.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "Content"   # Document store, relative to the site root
//! assets_dir = "."          # Where site assets are copied from
//!
//! [site]
//! name = "Rat Reviews"
//! base_url = "https://rat.reviews"
//! stylesheet = "rat.css"
//! favicon = "favicon.ico"
//! background = "tiles.png"
//!
//! [documents]
//! default_type = "General"
//! default_author = "Ape"
//! collision = "overwrite"   # overwrite | fail | version
//!
//! [index]
//! recent_limit = 13
//! archive_file = "Archive.html"
//! recent_file = "Recent.html"
//!
//! [assets]
//! extensions = ["css", "ico", "jpg", "jpeg", "png", "gif", "webp", "svg"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::paths::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Number of entries kept on the Recent page unless configured otherwise.
pub const MAX_RECENT: usize = 13;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the stock site layout. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document store directory, relative to the site root.
    pub content_dir: String,
    /// Directory site assets are copied from, relative to the site root.
    pub assets_dir: String,
    /// Page chrome: site name, links, stylesheet.
    pub site: SiteSection,
    /// Defaults and policies applied to new documents.
    pub documents: DocumentsConfig,
    /// Index page settings.
    pub index: IndexConfig,
    /// Which files count as site assets.
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "Content".to_string(),
            assets_dir: ".".to_string(),
            site: SiteSection::default(),
            documents: DocumentsConfig::default(),
            index: IndexConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content_dir must not be empty".into(),
            ));
        }
        if self.index.recent_limit == 0 {
            return Err(ConfigError::Validation(
                "index.recent_limit must be at least 1".into(),
            ));
        }
        for (key, name) in [
            ("index.archive_file", &self.index.archive_file),
            ("index.recent_file", &self.index.recent_file),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name"
                )));
            }
        }
        if self.index.archive_file == self.index.recent_file {
            return Err(ConfigError::Validation(
                "index.archive_file and index.recent_file must differ".into(),
            ));
        }
        if self.documents.default_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "documents.default_type must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Page chrome shared by every generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown in page titles and the copyright footer.
    pub name: String,
    /// Absolute base for the navigation bar links (no trailing slash).
    pub base_url: String,
    pub stylesheet: String,
    pub favicon: String,
    /// Tiled background image used on document pages.
    pub background: String,
    pub fonts_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Rat Reviews".to_string(),
            base_url: "https://rat.reviews".to_string(),
            stylesheet: "rat.css".to_string(),
            favicon: "favicon.ico".to_string(),
            background: "tiles.png".to_string(),
            fonts_url: "https://fonts.googleapis.com/css2?family=Bebas+Neue&family=Blaka&family=DotGothic16&family=Abhaya+Libre&display=swap".to_string(),
        }
    }
}

/// Defaults and policies applied when a document is published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentsConfig {
    /// Used when a submission leaves the type blank. Also the scanner's
    /// fallback for documents whose metadata has no `TYPE`.
    pub default_type: String,
    /// Signature used when a submission leaves the author blank.
    pub default_author: String,
    /// What to do when the resolved file already exists.
    pub collision: CollisionPolicy,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            default_type: "General".to_string(),
            default_author: "Ape".to_string(),
            collision: CollisionPolicy::Overwrite,
        }
    }
}

/// Index page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// How many documents the Recent page keeps.
    pub recent_limit: usize,
    /// Archive page file name, written at the site root.
    pub archive_file: String,
    /// Recent page file name, written at the site root.
    pub recent_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            recent_limit: MAX_RECENT,
            archive_file: "Archive.html".to_string(),
            recent_file: "Recent.html".to_string(),
        }
    }
}

/// Site asset selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// File extensions (without the dot, case-insensitive) copied beside
    /// each published document.
    pub extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            extensions: ["css", "ico", "jpg", "jpeg", "png", "gif", "webp", "svg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl AssetsConfig {
    /// Whether a file name carries one of the configured asset extensions.
    pub fn is_asset(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if there is no `config.toml`.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# rat-press configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Place this file at the site root, next to Archive.html and Recent.html.
# Unknown keys will cause an error.

# Document store, relative to the site root. Documents are written to
# <content_dir>/<type>/<year>/<month>/<album>.html
content_dir = "Content"

# Directory site assets (stylesheet, icons, images) are copied from.
assets_dir = "."

# ---------------------------------------------------------------------------
# Page chrome
# ---------------------------------------------------------------------------
[site]
name = "Rat Reviews"
# Navigation bar links are built from this (no trailing slash).
base_url = "https://rat.reviews"
stylesheet = "rat.css"
favicon = "favicon.ico"
# Tiled background image on document pages.
background = "tiles.png"
fonts_url = "https://fonts.googleapis.com/css2?family=Bebas+Neue&family=Blaka&family=DotGothic16&family=Abhaya+Libre&display=swap"

# ---------------------------------------------------------------------------
# New documents
# ---------------------------------------------------------------------------
[documents]
# Used when the type field is left blank; also the folder it lands in.
default_type = "General"
# Signature used when the author field is left blank.
default_author = "Ape"
# When the target file already exists:
#   overwrite - replace it (edit in place)
#   fail      - refuse to publish
#   version   - write <name>-2.html, <name>-3.html, ...
collision = "overwrite"

# ---------------------------------------------------------------------------
# Index pages
# ---------------------------------------------------------------------------
[index]
# Entries kept on the Recent page. Older documents stay in the Archive.
recent_limit = 13
archive_file = "Archive.html"
recent_file = "Recent.html"

# ---------------------------------------------------------------------------
# Site assets
# ---------------------------------------------------------------------------
[assets]
# Files in assets_dir with these extensions are copied beside each new
# document. Existing files at the destination are never overwritten.
extensions = ["css", "ico", "jpg", "jpeg", "png", "gif", "webp", "svg"]
"##
}
