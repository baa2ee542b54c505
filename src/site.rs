//! On-disk layout of a site and the write primitive everything shares.
//!
//! ```text
//! <root>/
//! ├── config.toml
//! ├── <archive_file>        # Archive.html
//! ├── <recent_file>         # Recent.html
//! ├── <assets_dir>/...      # rat.css, favicon.ico, tiles.png
//! └── <content_dir>/        # document store
//! ```

use crate::config::{self, ConfigError, SiteConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A site root together with its resolved configuration.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    pub config: SiteConfig,
}

impl Site {
    /// Open the site at `root`, loading `config.toml` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let config = config::load_config(&root)?;
        Ok(Self { root, config })
    }

    /// Build a site from an already-resolved configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The document store.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.config.content_dir)
    }

    pub fn assets_root(&self) -> PathBuf {
        self.root.join(&self.config.assets_dir)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(&self.config.index.archive_file)
    }

    pub fn recent_path(&self) -> PathBuf {
        self.root.join(&self.config.index.recent_file)
    }

    /// Link prefix that reaches the store from the site root, with forward
    /// slashes and no surrounding separators.
    pub fn content_prefix(&self) -> String {
        self.config
            .content_dir
            .replace('\\', "/")
            .trim_matches('/')
            .to_string()
    }
}

/// Write `contents` to `path` through a sibling temp file and a rename, so
/// readers never see a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_follows_config() {
        let mut config = SiteConfig::default();
        config.content_dir = "Reviews".to_string();
        config.index.recent_file = "Latest.html".to_string();
        let site = Site::with_config("/srv/site", config);

        assert_eq!(site.content_root(), Path::new("/srv/site/Reviews"));
        assert_eq!(site.recent_path(), Path::new("/srv/site/Latest.html"));
        assert_eq!(site.archive_path(), Path::new("/srv/site/Archive.html"));
        assert_eq!(site.assets_root(), Path::new("/srv/site/."));
    }

    #[test]
    fn content_prefix_uses_forward_slashes() {
        let mut config = SiteConfig::default();
        config.content_dir = "pub\\Content/".to_string();
        let site = Site::with_config("/srv/site", config);
        assert_eq!(site.content_prefix(), "pub/Content");
    }

    #[test]
    fn open_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "content_dir = \"Store\"\n").unwrap();
        let site = Site::open(tmp.path()).unwrap();
        assert_eq!(site.content_root(), tmp.path().join("Store"));
    }

    #[test]
    fn write_atomic_replaces_contents_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("page.html");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, "new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!tmp.path().join(".page.html.tmp").exists());
    }

    #[test]
    fn write_atomic_fails_when_directory_is_missing() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("missing").join("page.html");
        assert!(write_atomic(&target, "x").is_err());
    }
}
