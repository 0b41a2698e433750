//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, FindDescriptorCommand, GetCommand, LocateCommand, ShowCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect layered server configuration.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Inspect layered server configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Configuration file, lowest priority first (repeatable)
    #[arg(
        long = "config-file",
        value_name = "PATH",
        global = true,
        env = "STRATA_CONFIG_FILE"
    )]
    pub config_files: Vec<PathBuf>,

    /// Directory of *.conf files applied after the config files (repeatable)
    #[arg(long = "config-dir", value_name = "DIR", global = true)]
    pub config_dirs: Vec<PathBuf>,

    /// YAML option schema (default: built-in server schema)
    #[arg(long, value_name = "PATH", global = true, env = "STRATA_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Project name used to discover config files when none are given
    #[arg(long, value_name = "NAME", global = true, default_value = "strata")]
    pub project: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print every resolved option
    Show(ShowCommand),

    /// Print the value of one option
    Get(GetCommand),

    /// Find a file in an ordered list of directories
    Locate(LocateCommand),

    /// Print the location of the deployment descriptor
    FindDescriptor(FindDescriptorCommand),

    /// Check a single configuration file against the schema
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeatable_config_files_keep_order() {
        let cli = Cli::try_parse_from([
            "strata",
            "--config-file",
            "a.conf",
            "--config-file",
            "b.conf",
            "show",
        ])
        .unwrap();
        assert_eq!(
            cli.config_files,
            vec![PathBuf::from("a.conf"), PathBuf::from("b.conf")]
        );
        assert_eq!(cli.project, "strata");
    }
}
