//! Discovery of the primary configuration chain.
//!
//! Uses the same [`FileLocator`] as descriptor lookup: the first of the
//! default directories holding `{project}.conf` supplies the config file,
//! and the first holding a `{project}.conf.d` directory supplies the config
//! directory.

use std::path::PathBuf;

use crate::config::builder::ConfigBuilder;
use crate::error::Result;
use crate::path::{FileLocator, SearchRequest};

/// The default search directories for `project`, highest priority first:
/// `~/.{project}`, `~`, `/etc/{project}`, `/etc`.
///
/// # Examples
///
/// ```
/// use strata::config::discovery::default_config_dirs;
/// use std::path::PathBuf;
///
/// let dirs = default_config_dirs("strata");
/// assert!(dirs.ends_with(&[PathBuf::from("/etc/strata"), PathBuf::from("/etc")]));
/// ```
#[must_use]
pub fn default_config_dirs(project: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = home::home_dir() {
        dirs.push(home.join(format!(".{project}")));
        dirs.push(home);
    }
    dirs.push(PathBuf::from("/etc").join(project));
    dirs.push(PathBuf::from("/etc"));
    dirs
}

/// Build the chain for `project` by searching `dirs`.
///
/// Finding nothing is not an error: the returned builder is then empty and
/// resolves to schema defaults.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] or [`crate::Error::InvalidPath`] if a
/// directory cannot be read.
pub fn discover_chain(project: &str, dirs: &[PathBuf]) -> Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new();

    let file = SearchRequest::new(format!("{project}.conf")).with_dirs(dirs.iter().cloned());
    if let Some(path) = found(FileLocator::locate(&file))? {
        log::debug!("discovered config file {}", path.display());
        builder = builder.with_file(path);
    }

    let dir = SearchRequest::new(format!("{project}.conf.d"))
        .with_dirs(dirs.iter().cloned())
        .directories();
    if let Some(path) = found(FileLocator::locate(&dir))? {
        log::debug!("discovered config dir {}", path.display());
        builder = builder.with_config_dir(path);
    }

    Ok(builder)
}

fn found(result: Result<PathBuf>) -> Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discovers_first_file_and_conf_d() {
        let root = TempDir::new().unwrap();
        let user = root.path().join("user");
        let system = root.path().join("system");
        fs::create_dir_all(system.join("demo.conf.d")).unwrap();
        fs::create_dir_all(&user).unwrap();
        fs::write(user.join("demo.conf"), "[DEFAULT]\n").unwrap();
        fs::write(system.join("demo.conf"), "[DEFAULT]\n").unwrap();
        fs::write(system.join("demo.conf.d").join("10-extra.conf"), "[DEFAULT]\n").unwrap();

        let builder = discover_chain("demo", &[user.clone(), system.clone()]).unwrap();
        let files = builder.config_files().unwrap();
        assert_eq!(
            files,
            vec![user.join("demo.conf"), system.join("demo.conf.d").join("10-extra.conf")]
        );
    }

    #[test]
    fn test_nothing_found_is_empty_chain() {
        let root = TempDir::new().unwrap();
        let builder = discover_chain("demo", &[root.path().to_path_buf()]).unwrap();
        assert!(builder.is_empty());
    }

    #[test]
    fn test_default_dirs_order() {
        let dirs = default_config_dirs("demo");
        assert_eq!(dirs.last(), Some(&PathBuf::from("/etc")));
        assert!(dirs.contains(&PathBuf::from("/etc/demo")));
        if let Some(home) = home::home_dir() {
            assert_eq!(dirs[0], home.join(".demo"));
        }
    }
}
