//! Assembling a configuration chain and resolving it.

use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::resolved::ResolvedConfiguration;
use crate::config::resolver::DeprecationResolver;
use crate::config::source::{ConfigEntry, ConfigSource};
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::schema::OptionSchema;

/// Name of the in-memory layer holding programmatic overrides.
pub const OVERRIDES_SOURCE: &str = "overrides";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChainEntry {
    File(PathBuf),
    Dir(PathBuf),
}

/// Builds a [`ResolvedConfiguration`] from an ordered chain.
///
/// Files and config directories are layered in the order they are added;
/// overrides always form the final (highest) layer. The builder is cheap to
/// clone and can be kept around to re-resolve the same chain on reload.
///
/// # Examples
///
/// ```no_run
/// use strata::config::ConfigBuilder;
/// use strata::server_schema;
///
/// let schema = server_schema().unwrap();
/// let config = ConfigBuilder::new()
///     .with_file("/etc/strata/strata.conf")
///     .with_config_dir("/etc/strata/strata.conf.d")
///     .with_override("DEFAULT", "debug", "true")
///     .build(&schema)
///     .unwrap();
///
/// assert_eq!(config.get_bool("DEFAULT", "debug").unwrap(), Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBuilder {
    chain: Vec<ChainEntry>,
    overrides: Vec<ConfigEntry>,
}

impl ConfigBuilder {
    /// An empty chain: resolving it yields schema defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a config file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.chain.push(ChainEntry::File(path.into()));
        self
    }

    /// Append several config files, in order.
    #[must_use]
    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.chain
            .extend(paths.into_iter().map(|p| ChainEntry::File(p.into())));
        self
    }

    /// Append a config directory; its `*.conf` files join the chain in
    /// file-name order when the chain is loaded.
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chain.push(ChainEntry::Dir(dir.into()));
        self
    }

    /// Set a value in the override layer.
    #[must_use]
    pub fn with_override(
        mut self,
        group: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.overrides.push(ConfigEntry::new(group, key, value));
        self
    }

    /// Returns true if no files, directories or overrides were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() && self.overrides.is_empty()
    }

    /// The chain's file paths, with config directories expanded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileNotFound`] for a missing config directory.
    pub fn config_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in &self.chain {
            match entry {
                ChainEntry::File(path) => files.push(path.clone()),
                ChainEntry::Dir(dir) => files.extend(ConfigLoader::config_dir_files(dir)?),
            }
        }
        Ok(files)
    }

    /// Load every layer, in chain order, with the override layer last.
    ///
    /// # Errors
    ///
    /// Returns the first load error; see [`ConfigLoader::load_all`].
    pub fn load_sources(&self) -> Result<Vec<ConfigSource>> {
        let mut sources = ConfigLoader::load_all(&self.config_files()?)?;
        if !self.overrides.is_empty() {
            sources.push(ConfigSource::inline(OVERRIDES_SOURCE, self.overrides.clone()));
        }
        Ok(sources)
    }

    /// Load, resolve and validate the chain against `schema`.
    ///
    /// # Errors
    ///
    /// Returns load errors ([`crate::Error::ConfigParse`],
    /// [`crate::Error::FileNotFound`]) or the first
    /// [`crate::Error::InvalidValue`] found by validation. Nothing is
    /// returned on failure, so a partially valid chain never escapes.
    pub fn build(&self, schema: &OptionSchema) -> Result<ResolvedConfiguration> {
        let sources = self.load_sources()?;
        let resolved = DeprecationResolver::new(schema).resolve(&sources);
        ConfigValidator::validate(&resolved, schema)?;
        log::debug!(
            "resolved {} options from {} layers",
            resolved.len(),
            sources.len()
        );
        Ok(resolved)
    }
}
