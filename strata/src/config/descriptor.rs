//! Locating the deployment descriptor named by a resolved option.
//!
//! The descriptor (a paste deployment file by default) is only located,
//! never read: the resulting path is handed to the server stack.

use std::path::{Path, PathBuf};

use crate::config::resolved::ResolvedConfiguration;
use crate::error::{Error, Result};
use crate::path::{FileLocator, SearchRequest};
use crate::schema::OptionKey;

/// Group of the default descriptor option.
pub const DESCRIPTOR_GROUP: &str = "paste_deploy";
/// Name of the default descriptor option.
pub const DESCRIPTOR_KEY: &str = "config_file";

/// Finds the descriptor file named by an option of a resolved configuration.
///
/// Search order: the directories of the chain's config files, from the
/// highest layer down (each directory once), then the fallback directories
/// in the order added.
///
/// # Examples
///
/// ```no_run
/// use strata::config::{ConfigBuilder, DescriptorLocator};
/// use strata::server_schema;
///
/// let config = ConfigBuilder::new()
///     .with_file("/etc/strata/strata.conf")
///     .build(&server_schema().unwrap())
///     .unwrap();
///
/// let paste = DescriptorLocator::new()
///     .with_fallback_dir("/usr/share/strata")
///     .locate(&config)
///     .unwrap();
/// println!("{}", paste.display());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorLocator {
    option: OptionKey,
    fallback_dirs: Vec<PathBuf>,
}

impl Default for DescriptorLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorLocator {
    /// Locator for `[paste_deploy] config_file`.
    #[must_use]
    pub fn new() -> Self {
        Self::for_option(OptionKey::new(DESCRIPTOR_GROUP, DESCRIPTOR_KEY))
    }

    /// Locator for an arbitrary option holding a file name.
    #[must_use]
    pub fn for_option(option: OptionKey) -> Self {
        Self {
            option,
            fallback_dirs: Vec::new(),
        }
    }

    /// Search `dir` after the config file directories.
    #[must_use]
    pub fn with_fallback_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback_dirs.push(dir.into());
        self
    }

    /// The option that names the descriptor.
    #[must_use]
    pub fn option(&self) -> &OptionKey {
        &self.option
    }

    /// The directories a lookup against `config` will search, in order.
    #[must_use]
    pub fn search_dirs(&self, config: &ResolvedConfiguration) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let config_dirs = config.file_sources().rev().map(|file| match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        });
        for dir in config_dirs.chain(self.fallback_dirs.iter().cloned()) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }

    /// Locate the descriptor.
    ///
    /// An absolute option value is checked as-is; otherwise the value is
    /// searched for in [`search_dirs`](Self::search_dirs).
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownOption`] if the schema does not declare the option.
    /// - [`Error::InvalidValue`] if the option is unset or empty.
    /// - [`Error::FileNotFound`] naming the file and every directory searched.
    pub fn locate(&self, config: &ResolvedConfiguration) -> Result<PathBuf> {
        let name = config
            .get_key(&self.option)?
            .value()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| Error::InvalidValue {
                group: self.option.group.clone(),
                key: self.option.name.clone(),
                value: String::new(),
                expected: "a descriptor file name".to_string(),
            })?;

        let request = if Path::new(name).is_absolute() {
            SearchRequest::new(name)
        } else {
            SearchRequest::new(name).with_dirs(self.search_dirs(config))
        };
        let found = FileLocator::locate(&request)?;
        log::debug!("descriptor {} resolved to {}", self.option, found.display());
        Ok(found)
    }
}
