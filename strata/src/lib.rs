#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! Layered configuration resolution for server processes.
//!
//! An ordered chain of config files, config directories and overrides is
//! merged against a declared option schema. Options that were renamed keep
//! working under their deprecated names, but a value under the current name
//! always wins. The result is an immutable [`ResolvedConfiguration`] that
//! can be shared across threads and swapped atomically through a
//! [`ConfigStore`].
//!
//! ## Core Types
//!
//! - [`OptionSchema`] and [`OptionSpec`]: Declared options and their renames
//! - [`ConfigBuilder`]: The source chain, resolved with [`ConfigBuilder::build`]
//! - [`ResolvedConfiguration`]: Effective values with provenance
//! - [`FileLocator`] and [`DescriptorLocator`]: File lookup in search paths
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use strata::{server_schema, ConfigBuilder};
//!
//! let schema = server_schema().unwrap();
//! let config = ConfigBuilder::new()
//!     .with_override("sql", "connection", "sqlite://deprecated")
//!     .with_override("database", "connection", "sqlite://new")
//!     .build(&schema)
//!     .unwrap();
//!
//! assert_eq!(
//!     config.get_str("database", "connection").unwrap(),
//!     Some("sqlite://new")
//! );
//! assert_eq!(config.get_bool("profiler", "enabled").unwrap(), Some(false));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod schema;

// Re-export key types at crate root for convenience
pub use config::{ConfigBuilder, ConfigStore, DescriptorLocator, ResolvedConfiguration};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{FileLocator, SearchRequest};
pub use schema::{server_schema, OptionKey, OptionSchema, OptionSpec};
