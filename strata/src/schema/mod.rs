//! The option schema contract.
//!
//! The resolver never invents options: it resolves exactly the options an
//! [`OptionSchema`] declares, and uses the schema's deprecated names to map
//! old spellings onto current ones. Schemas are built in code
//! ([`OptionSpec`] builders), loaded from YAML, or taken from
//! [`server_schema`].

pub mod option;
pub mod registry;
pub mod server;

pub use option::{OptionAlias, OptionKey, OptionKind, OptionSpec};
pub use registry::OptionSchema;
pub use server::{server_schema, DEFAULT_PASTE_CONFIG};
