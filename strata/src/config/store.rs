//! Process-wide configuration snapshot with atomic replacement.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::builder::ConfigBuilder;
use crate::config::resolved::ResolvedConfiguration;
use crate::error::Result;
use crate::schema::OptionSchema;

/// Owns the current [`ResolvedConfiguration`] and swaps it atomically.
///
/// Readers take an `Arc` snapshot with [`ConfigStore::current`] and keep a
/// coherent view for as long as they hold it, even across reloads. A reload
/// resolves the whole chain first and swaps only on success, so readers see
/// either the complete old configuration or the complete new one.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigBuilder, ConfigStore};
/// use strata::server_schema;
///
/// let store = ConfigStore::open(server_schema().unwrap(), ConfigBuilder::new()).unwrap();
/// let before = store.current();
///
/// let after = store.reload().unwrap();
/// assert_eq!(*before, *after);
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    schema: OptionSchema,
    builder: ConfigBuilder,
    current: ArcSwap<ResolvedConfiguration>,
}

impl ConfigStore {
    /// Resolve `builder`'s chain and publish the result.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ConfigBuilder::build`].
    pub fn open(schema: OptionSchema, builder: ConfigBuilder) -> Result<Self> {
        let initial = builder.build(&schema)?;
        Ok(Self {
            schema,
            builder,
            current: ArcSwap::from_pointee(initial),
        })
    }

    /// The current snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<ResolvedConfiguration> {
        self.current.load_full()
    }

    /// Publish `config`, returning the snapshot it replaced.
    pub fn replace(&self, config: ResolvedConfiguration) -> Arc<ResolvedConfiguration> {
        self.current.swap(Arc::new(config))
    }

    /// Re-resolve the chain and publish the result.
    ///
    /// # Errors
    ///
    /// Returns the resolution error and leaves the current snapshot in place.
    pub fn reload(&self) -> Result<Arc<ResolvedConfiguration>> {
        let fresh = Arc::new(self.builder.build(&self.schema)?);
        self.current.store(Arc::clone(&fresh));
        log::debug!("configuration reloaded");
        Ok(fresh)
    }

    /// The schema configurations are resolved against.
    #[must_use]
    pub fn schema(&self) -> &OptionSchema {
        &self.schema
    }

    /// The chain reloads re-resolve.
    #[must_use]
    pub fn builder(&self) -> &ConfigBuilder {
        &self.builder
    }
}
