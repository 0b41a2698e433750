//! First-match file search across an ordered list of directories.
//!
//! The same locator finds the primary configuration files and, after
//! resolution, the deployment descriptor a configuration option names.
//! Every call goes back to the filesystem; nothing is cached.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::normalize;

/// What kind of filesystem entry a search accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    /// A regular file (or a symlink to one).
    #[default]
    File,
    /// A directory (used for `*.conf.d` config directories).
    Directory,
}

/// A logical file name plus the directories to look in, in priority order.
///
/// # Examples
///
/// ```
/// use strata::path::SearchRequest;
///
/// let request = SearchRequest::new("strata-paste.ini")
///     .with_dir("/etc/strata")
///     .with_dir("/usr/share/strata");
/// assert_eq!(request.dirs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The file name to find. An absolute path is checked as-is.
    pub name: String,
    /// Candidate directories, first match wins.
    pub dirs: Vec<PathBuf>,
    /// Entry kind to accept.
    pub kind: EntryKind,
}

impl SearchRequest {
    /// A file search with no directories yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirs: Vec::new(),
            kind: EntryKind::File,
        }
    }

    /// Append a candidate directory.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    /// Append several candidate directories.
    #[must_use]
    pub fn with_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Look for a directory instead of a file.
    #[must_use]
    pub fn directories(mut self) -> Self {
        self.kind = EntryKind::Directory;
        self
    }
}

/// Searches directories in order for a named file.
///
/// # Examples
///
/// ```no_run
/// use strata::path::{FileLocator, SearchRequest};
///
/// let request = SearchRequest::new("strata-paste.ini").with_dirs(["/etc/strata", "/etc"]);
/// match FileLocator::locate(&request) {
///     Ok(path) => println!("using {}", path.display()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub struct FileLocator;

impl FileLocator {
    /// Return the absolute path of the first match.
    ///
    /// Directories are searched in order and the search stops at the first
    /// hit. Directories that do not exist are skipped; any other failure to
    /// stat one aborts the search.
    ///
    /// # Errors
    ///
    /// - [`Error::FileNotFound`] with the request's directories (exactly as
    ///   given) when nothing matches, including when no directories are given.
    /// - [`Error::Io`] when probing fails for a reason other than absence,
    ///   such as permission denied.
    /// - [`Error::InvalidPath`] when a directory cannot be normalized.
    pub fn locate(request: &SearchRequest) -> Result<PathBuf> {
        let name = Path::new(&request.name);
        if name.is_absolute() {
            return Self::locate_absolute(name, request.kind);
        }

        for dir in &request.dirs {
            let dir = normalize(dir)?;
            if !entry_metadata(&dir)?.is_some_and(|meta| meta.is_dir()) {
                log::debug!("skipping missing search directory {}", dir.display());
                continue;
            }
            let candidate = dir.join(name);
            log::debug!("probing {}", candidate.display());
            if Self::matches(&candidate, request.kind)? {
                return Ok(candidate);
            }
        }

        Err(Error::FileNotFound {
            name: request.name.clone(),
            searched_dirs: request.dirs.clone(),
        })
    }

    fn locate_absolute(path: &Path, kind: EntryKind) -> Result<PathBuf> {
        if Self::matches(path, kind)? {
            return Ok(path.to_path_buf());
        }
        Err(Error::FileNotFound {
            name: path.display().to_string(),
            searched_dirs: path.parent().map(Path::to_path_buf).into_iter().collect(),
        })
    }

    fn matches(candidate: &Path, kind: EntryKind) -> Result<bool> {
        Ok(entry_metadata(candidate)?.is_some_and(|meta| match kind {
            EntryKind::File => meta.is_file(),
            EntryKind::Directory => meta.is_dir(),
        }))
    }
}

/// Metadata of `path`, following symlinks; `None` if nothing is there.
///
/// Only absence counts as `None`. Any other failure (permission denied,
/// symlink loops, device errors) is an [`Error::Io`].
pub(crate) fn entry_metadata(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs(root: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|n| {
                let dir = root.path().join(n);
                fs::create_dir_all(&dir).unwrap();
                dir
            })
            .collect()
    }

    #[test]
    fn test_first_directory_in_order_wins() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d1", "d2", "d3"]);
        fs::write(d[1].join("paste.ini"), "").unwrap();
        fs::write(d[2].join("paste.ini"), "").unwrap();

        let found = FileLocator::locate(&SearchRequest::new("paste.ini").with_dirs(d.clone())).unwrap();
        assert_eq!(found, d[1].join("paste.ini"));
        assert!(found.is_absolute());
    }

    #[test]
    fn test_not_found_reports_every_dir() {
        let root = TempDir::new().unwrap();
        let mut d = dirs(&root, &["d1", "d2"]);
        d.push(root.path().join("missing"));

        let err = FileLocator::locate(&SearchRequest::new("paste.ini").with_dirs(d.clone())).unwrap_err();
        match err {
            Error::FileNotFound { name, searched_dirs } => {
                assert_eq!(name, "paste.ini");
                assert_eq!(searched_dirs, d);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_no_dirs_is_not_found() {
        let err = FileLocator::locate(&SearchRequest::new("paste.ini")).unwrap_err();
        match err {
            Error::FileNotFound { searched_dirs, .. } => assert!(searched_dirs.is_empty()),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_directory_with_same_name_is_not_a_file() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d1", "d2"]);
        fs::create_dir(d[0].join("paste.ini")).unwrap();
        fs::write(d[1].join("paste.ini"), "").unwrap();

        let found = FileLocator::locate(&SearchRequest::new("paste.ini").with_dirs(d.clone())).unwrap();
        assert_eq!(found, d[1].join("paste.ini"));
    }

    #[test]
    fn test_directory_search() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d1", "d2"]);
        fs::create_dir(d[1].join("strata.conf.d")).unwrap();

        let request = SearchRequest::new("strata.conf.d").with_dirs(d.clone()).directories();
        assert_eq!(FileLocator::locate(&request).unwrap(), d[1].join("strata.conf.d"));
    }

    #[test]
    fn test_absolute_name_checked_directly() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("custom-paste.ini");
        fs::write(&file, "").unwrap();

        let request = SearchRequest::new(file.to_string_lossy()).with_dir("/nonexistent");
        assert_eq!(FileLocator::locate(&request).unwrap(), file);

        let missing = root.path().join("gone.ini");
        let err = FileLocator::locate(&SearchRequest::new(missing.to_string_lossy())).unwrap_err();
        match err {
            Error::FileNotFound { searched_dirs, .. } => {
                assert_eq!(searched_dirs, vec![root.path().to_path_buf()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rescans_each_call() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d1"]);
        let request = SearchRequest::new("late.ini").with_dirs(d.clone());

        assert!(FileLocator::locate(&request).is_err());
        fs::write(d[0].join("late.ini"), "").unwrap();
        assert!(FileLocator::locate(&request).is_ok());
    }

    #[cfg(unix)]
    fn symlink_loop(root: &TempDir) -> PathBuf {
        let link = root.path().join("loop");
        std::os::unix::fs::symlink(&link, &link).unwrap();
        link
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_search_dir_is_io_error() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d2"]);
        let request = SearchRequest::new("paste.ini")
            .with_dir(symlink_loop(&root))
            .with_dirs(d.clone());
        fs::write(d[0].join("paste.ini"), "").unwrap();

        let err = FileLocator::locate(&request).unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("loop")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_is_io_error() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d1"]);
        std::os::unix::fs::symlink(d[0].join("paste.ini"), d[0].join("paste.ini")).unwrap();

        let err = FileLocator::locate(&SearchRequest::new("paste.ini").with_dirs(d.clone())).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        let absolute = SearchRequest::new(symlink_loop(&root).to_string_lossy());
        assert!(matches!(FileLocator::locate(&absolute).unwrap_err(), Error::Io { .. }));
    }

    #[test]
    fn test_file_used_as_search_dir_is_skipped() {
        let root = TempDir::new().unwrap();
        let d = dirs(&root, &["d2"]);
        let not_a_dir = root.path().join("plain");
        fs::write(&not_a_dir, "").unwrap();
        fs::write(d[0].join("paste.ini"), "").unwrap();

        let request = SearchRequest::new("paste.ini").with_dir(&not_a_dir).with_dirs(d.clone());
        assert_eq!(FileLocator::locate(&request).unwrap(), d[0].join("paste.ini"));
    }
}
