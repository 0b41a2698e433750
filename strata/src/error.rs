//! Error types for the strata library.
//!
//! Every failure the resolution pipeline can surface is a distinct variant of
//! [`Error`], so callers (startup code, tests) can match on the exact
//! condition instead of inspecting message text.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn lookup() -> Result<&'static str> {
///     Err(Error::UnknownOption {
///         group: "database".to_string(),
///         key: "conection".to_string(),
///     })
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration source could not be read or is malformed.
    ///
    /// `line` is 1-based; 0 means the failure is not tied to a line
    /// (unreadable file, YAML error without a location).
    #[error("failed to parse {} at line {line}: {detail}", path.display())]
    ConfigParse {
        /// The offending source file.
        path: PathBuf,
        /// The offending line.
        line: usize,
        /// What was wrong with it.
        detail: String,
    },

    /// A named file was not present in any candidate directory.
    #[error("could not find '{name}' (searched: {})", join_dirs(searched_dirs))]
    FileNotFound {
        /// The logical file name that was searched for.
        name: String,
        /// Every directory searched, in search order.
        searched_dirs: Vec<PathBuf>,
    },

    /// A lookup named an option the schema never declared.
    #[error("unknown option [{group}] {key}")]
    UnknownOption {
        /// Group of the requested option.
        group: String,
        /// Name of the requested option.
        key: String,
    },

    /// A value could not be interpreted as the option's declared kind.
    #[error("invalid value '{value}' for [{group}] {key}: expected {expected}")]
    InvalidValue {
        /// Group of the option.
        group: String,
        /// Name of the option.
        key: String,
        /// The text that failed to convert.
        value: String,
        /// Description of the accepted form.
        expected: String,
    },

    /// The option schema is inconsistent.
    #[error("invalid option schema: {message}")]
    Schema {
        /// A description of the inconsistency.
        message: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error other than "not found" occurred while probing a path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

fn join_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "no directories".to_string();
    }
    let mut out = String::new();
    for (i, dir) in dirs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", dir.display());
    }
    out
}

impl Error {
    /// Check if the error is a [`Error::FileNotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    ///
    /// let err = Error::FileNotFound { name: "paste.ini".into(), searched_dirs: vec![] };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if the error is a [`Error::ConfigParse`].
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ConfigParse { .. })
    }

    /// Check if the error is an [`Error::UnknownOption`].
    #[must_use]
    pub fn is_unknown_option(&self) -> bool {
        matches!(self, Self::UnknownOption { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error() {
        let err = Error::ConfigParse {
            path: PathBuf::from("/etc/strata/strata.conf"),
            line: 12,
            detail: "entry appears before any [section] header".to_string(),
        };
        let display = format!("{err}");
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/etc/strata/strata.conf"));
        assert!(display.contains("line 12"));
        assert!(display.contains("[section]"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_file_not_found_lists_dirs() {
        let err = Error::FileNotFound {
            name: "strata-paste.ini".to_string(),
            searched_dirs: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        let display = format!("{err}");
        assert!(display.contains("strata-paste.ini"));
        assert!(display.contains("/a, /b"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_file_not_found_without_dirs() {
        let err = Error::FileNotFound {
            name: "x.ini".to_string(),
            searched_dirs: Vec::new(),
        };
        assert!(format!("{err}").contains("no directories"));
    }

    #[test]
    fn test_unknown_option_error() {
        let err = Error::UnknownOption {
            group: "database".to_string(),
            key: "conection".to_string(),
        };
        assert_eq!(format!("{err}"), "unknown option [database] conection");
        assert!(err.is_unknown_option());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_value_error() {
        let err = Error::InvalidValue {
            group: "database".to_string(),
            key: "idle_timeout".to_string(),
            value: "soon".to_string(),
            expected: "an integer".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("'soon'"));
        assert!(display.contains("an integer"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: PathBuf::from("/restricted"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(format!("{err}").contains("I/O error"));
    }
}
