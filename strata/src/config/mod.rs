//! Layered configuration resolution.
//!
//! A configuration is resolved from an ordered chain of sources:
//!
//! 1. Config files, in the order given (INI `.conf` or YAML)
//! 2. Config directories, expanded to their `*.conf` files in name order
//! 3. Programmatic overrides (via `ConfigBuilder::with_override`)
//!
//! Later layers override earlier ones for the same `(group, key)`. Options
//! renamed in the schema are reconciled afterwards: a value under the
//! current name always beats one under a deprecated name, whatever the
//! layer order (see [`resolver`]).
//!
//! # Examples
//!
//! Deprecated names still resolve:
//!
//! ```
//! use strata::config::ConfigBuilder;
//! use strata::server_schema;
//!
//! let schema = server_schema().unwrap();
//! let config = ConfigBuilder::new()
//!     .with_override("sql", "idle_timeout", "54321")
//!     .build(&schema)
//!     .unwrap();
//!
//! assert_eq!(config.get_int("database", "idle_timeout").unwrap(), Some(54321));
//! assert!(config.get("database", "idle_timeout").unwrap().is_deprecated_alias());
//! ```
//!
//! Loading from files and publishing for readers:
//!
//! ```no_run
//! use strata::config::{ConfigBuilder, ConfigStore, DescriptorLocator};
//! use strata::server_schema;
//!
//! let builder = ConfigBuilder::new()
//!     .with_file("/etc/strata/strata.conf")
//!     .with_config_dir("/etc/strata/strata.conf.d");
//! let store = ConfigStore::open(server_schema().unwrap(), builder).unwrap();
//!
//! let paste = DescriptorLocator::new().locate(&store.current()).unwrap();
//! println!("paste config: {}", paste.display());
//! ```

pub mod builder;
pub mod descriptor;
pub mod discovery;
pub mod ini;
pub mod loader;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod store;
pub mod validator;
pub mod yaml;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use descriptor::DescriptorLocator;
pub use loader::{ConfigLoader, SourceFormat};
pub use resolved::{NameForm, Provenance, ResolvedConfiguration, ResolvedValue};
pub use resolver::{DeprecationResolver, LayerIndex};
pub use source::{ConfigEntry, ConfigSource, SourceOrigin};
pub use store::ConfigStore;
pub use validator::ConfigValidator;
