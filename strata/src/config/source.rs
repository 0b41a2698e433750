//! Parsed configuration layers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// One `(group, key, value)` triple read from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    /// Group (INI section) the entry appeared under.
    pub group: String,
    /// Option name as written.
    pub key: String,
    /// Raw value text.
    pub value: String,
    /// 1-based line of the entry; 0 when the format carries no positions.
    pub line: usize,
}

impl ConfigEntry {
    /// Creates an entry without a line number.
    pub fn new(group: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            value: value.into(),
            line: 0,
        }
    }

    /// Sets the line number.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Where a layer came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    /// A file on disk.
    File(PathBuf),
    /// Values supplied in memory (programmatic overrides).
    Inline(String),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(name) => write!(f, "<{name}>"),
        }
    }
}

impl Serialize for SourceOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One layer of configuration: the entries of a single source, in file order.
///
/// Layers are combined in the order they are supplied; a later layer
/// overrides an earlier one for the same `(group, key)`.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigEntry, ConfigSource};
///
/// let layer = ConfigSource::inline(
///     "overrides",
///     vec![ConfigEntry::new("paste_deploy", "config_file", "custom-paste.ini")],
/// );
/// assert_eq!(layer.get("paste_deploy", "config_file"), Some("custom-paste.ini"));
/// assert!(layer.path().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Identity of the source, for diagnostics and provenance.
    pub origin: SourceOrigin,
    /// Entries in the order they appeared.
    pub entries: Vec<ConfigEntry>,
}

impl ConfigSource {
    /// A layer read from `path`.
    pub fn from_file(path: impl Into<PathBuf>, entries: Vec<ConfigEntry>) -> Self {
        Self {
            origin: SourceOrigin::File(path.into()),
            entries,
        }
    }

    /// A layer built in memory.
    pub fn inline(name: impl Into<String>, entries: Vec<ConfigEntry>) -> Self {
        Self {
            origin: SourceOrigin::Inline(name.into()),
            entries,
        }
    }

    /// The file path, for file-backed layers.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            SourceOrigin::File(path) => Some(path),
            SourceOrigin::Inline(_) => None,
        }
    }

    /// The value this layer sets for `group`/`key`; a repeated key keeps its
    /// last occurrence.
    #[must_use]
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.group == group && e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the layer sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
