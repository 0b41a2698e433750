//! Configuration file loading.
//!
//! Turns an ordered chain of paths into an ordered list of
//! [`ConfigSource`] layers. Loading is all-or-nothing: the first unreadable
//! or malformed file aborts the whole chain.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::source::ConfigSource;
use crate::config::{ini, yaml};
use crate::error::{Error, Result};
use crate::path::locator::entry_metadata;

/// Extension of files picked up from a config directory.
pub const CONFIG_DIR_EXTENSION: &str = "conf";

/// Syntax of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `[group]` / `key = value` files. Used for every extension but YAML's.
    Ini,
    /// `.yaml` / `.yml` files.
    Yaml,
}

impl SourceFormat {
    /// Pick the format for `path`.
    ///
    /// ```
    /// use strata::config::SourceFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(SourceFormat::for_path(Path::new("strata.conf")), SourceFormat::Ini);
    /// assert_eq!(SourceFormat::for_path(Path::new("strata.YML")), SourceFormat::Yaml);
    /// ```
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Ini,
        }
    }
}

/// Loads configuration layers from disk.
///
/// # Examples
///
/// ```no_run
/// use strata::config::ConfigLoader;
/// use std::path::PathBuf;
///
/// let chain = vec![
///     PathBuf::from("/etc/strata/strata.conf"),
///     PathBuf::from("/etc/strata/local.conf"),
/// ];
/// let layers = ConfigLoader::load_all(&chain).unwrap();
/// assert_eq!(layers.len(), 2);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load every path in order, one layer per path.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::ConfigParse`] encountered; nothing is
    /// returned for the files that loaded before it.
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ConfigSource>> {
        paths
            .iter()
            .map(|path| Self::load_file(path.as_ref()))
            .collect()
    }

    /// Load and parse a single file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the file cannot be read (line 0) or
    /// its contents are malformed.
    pub fn load_file(path: &Path) -> Result<ConfigSource> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            line: 0,
            detail: format!("failed to read configuration file: {e}"),
        })?;

        let entries = match SourceFormat::for_path(path) {
            SourceFormat::Ini => ini::parse(path, &contents)?,
            SourceFormat::Yaml => yaml::parse(path, &contents)?,
        };
        log::debug!("loaded {} entries from {}", entries.len(), path.display());

        Ok(ConfigSource::from_file(path, entries))
    }

    /// The `*.conf` files of a config directory, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if `dir` is not a directory, or
    /// [`Error::Io`] if it or one of its entries cannot be inspected.
    pub fn config_dir_files(dir: &Path) -> Result<Vec<PathBuf>> {
        if !entry_metadata(dir)?.is_some_and(|meta| meta.is_dir()) {
            return Err(Error::FileNotFound {
                name: dir.display().to_string(),
                searched_dirs: dir.parent().map(Path::to_path_buf).into_iter().collect(),
            });
        }

        let io_error = |source| Error::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_conf = path
                .extension()
                .is_some_and(|ext| ext == CONFIG_DIR_EXTENSION);
            if is_conf && entry_metadata(&path)?.is_some_and(|meta| meta.is_file()) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        log::debug!("config dir {} holds {} files", dir.display(), files.len());
        Ok(files)
    }
}
