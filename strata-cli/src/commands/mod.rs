//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `show`: Print every resolved option
//! - `get`: Print the value of one option
//! - `locate`: Find a file in an ordered list of directories
//! - `find_descriptor`: Print the location of the deployment descriptor
//! - `validate`: Check a single configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod find_descriptor;
pub mod get;
pub mod locate;
pub mod show;
pub mod validate;

pub use completions::CompletionsCommand;
pub use find_descriptor::FindDescriptorCommand;
pub use get::GetCommand;
pub use locate::LocateCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
