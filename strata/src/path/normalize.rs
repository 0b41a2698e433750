//! Path normalization for search directories.
//!
//! Search directories may be written as `~/...` or relative to the working
//! directory; they are turned into absolute paths without following
//! symlinks, so the located file keeps the spelling the caller configured.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// `~user` is not supported.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path is not UTF-8, the home
/// directory is unknown, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use strata::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// assert!(expand_tilde(Path::new("~/.strata")).unwrap().is_absolute());
/// assert_eq!(expand_tilde(Path::new("/etc/strata")).unwrap(), Path::new("/etc/strata"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let text = path.to_str().ok_or_else(|| invalid(path, "path contains invalid UTF-8"))?;

    let Some(rest) = text.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };
    let home = home::home_dir().ok_or_else(|| invalid(path, "cannot determine home directory"))?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(tail))
    } else {
        Err(invalid(path, "~user syntax is not supported; use ~ or ~/path"))
    }
}

/// Drop `.` components and apply `..` lexically.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `..` would climb above the root.
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(invalid(path, "path climbs above the root"));
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    Ok(result)
}

/// Expand `~`, anchor relative paths at the working directory, and resolve
/// `.`/`..`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if any step fails.
///
/// # Examples
///
/// ```
/// use strata::path::normalize::normalize;
/// use std::path::Path;
///
/// assert!(normalize(Path::new("etc")).unwrap().is_absolute());
/// # #[cfg(unix)]
/// assert_eq!(normalize(Path::new("/etc/./strata/../strata")).unwrap(), Path::new("/etc/strata"));
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .map_err(|e| invalid(path, &format!("cannot get current directory: {e}")))?
            .join(expanded)
    };
    resolve_components(&absolute)
}

fn invalid(path: &Path, reason: &str) -> Error {
    Error::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
