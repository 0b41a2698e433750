//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! schema loading, building the configuration chain and display helpers.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use strata::config::discovery::{default_config_dirs, discover_chain};
use strata::{ConfigBuilder, Logger, OptionKey, OptionSchema, ResolvedConfiguration};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit config files, lowest priority first.
    pub config_files: Vec<PathBuf>,

    /// Config directories applied after the files.
    pub config_dirs: Vec<PathBuf>,

    /// YAML schema file replacing the built-in one.
    pub schema: Option<PathBuf>,

    /// Project name for discovery.
    pub project: String,

    /// User-facing diagnostics.
    pub logger: Logger,
}

/// Load the option schema: the `--schema` file if given, else the built-in
/// server schema.
pub fn load_schema(global: &GlobalOptions) -> Result<OptionSchema, CliError> {
    let schema = match &global.schema {
        Some(path) => OptionSchema::from_yaml_file(path)?,
        None => strata::server_schema()?,
    };
    Ok(schema)
}

/// The chain to resolve.
///
/// Explicit `--config-file`/`--config-dir` arguments are used as given.
/// Without them, `{project}.conf` and `{project}.conf.d` are discovered in
/// the default directories.
pub fn config_builder(global: &GlobalOptions) -> Result<ConfigBuilder, CliError> {
    if global.config_files.is_empty() && global.config_dirs.is_empty() {
        let dirs = default_config_dirs(&global.project);
        let builder = discover_chain(&global.project, &dirs)?;
        if builder.is_empty() {
            global.logger.info(&format!(
                "No {}.conf found; using schema defaults",
                global.project
            ));
        }
        return Ok(builder);
    }

    let builder = global
        .config_dirs
        .iter()
        .fold(ConfigBuilder::new().with_files(&global.config_files), |b, dir| {
            b.with_config_dir(dir)
        });
    Ok(builder)
}

/// Load the schema, resolve the chain and report unrecognized options.
pub fn resolve(global: &GlobalOptions) -> Result<ResolvedConfiguration, CliError> {
    let schema = load_schema(global)?;
    let config = config_builder(global)?.build(&schema)?;

    for key in config.unrecognized() {
        global
            .logger
            .warn(&format!("Ignoring unrecognized option [{}] {}", key.group, key.name));
    }

    Ok(config)
}

/// Parse a `group.key` argument.
pub fn parse_option_key(text: &str) -> Result<OptionKey, CliError> {
    text.parse().map_err(|_| {
        CliError::InvalidArguments(format!("expected an option as group.key, found '{text}'"))
    })
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata::LogLevel;

    fn global() -> GlobalOptions {
        GlobalOptions {
            quiet: true,
            config_files: Vec::new(),
            config_dirs: Vec::new(),
            schema: None,
            project: "strata".to_string(),
            logger: Logger::new(LogLevel::Quiet),
        }
    }

    #[test]
    fn test_parse_option_key() {
        assert_eq!(
            parse_option_key("database.connection").unwrap(),
            OptionKey::new("database", "connection")
        );
        assert_eq!(parse_option_key("nodot").unwrap_err().exit_code(), 4);
    }

    #[test]
    fn test_explicit_chain_order() {
        let mut global = global();
        global.config_files = vec![PathBuf::from("/a.conf"), PathBuf::from("/b.conf")];
        global.config_dirs = vec![PathBuf::from("/conf.d")];

        let expected = ConfigBuilder::new()
            .with_file("/a.conf")
            .with_file("/b.conf")
            .with_config_dir("/conf.d");
        assert_eq!(config_builder(&global).unwrap(), expected);
    }

    #[test]
    fn test_builtin_schema_when_none_given() {
        let schema = load_schema(&global()).unwrap();
        assert!(schema.contains(&OptionKey::new("database", "connection")));
    }

    #[test]
    fn test_shorten_path_outside_home() {
        assert_eq!(shorten_path(Path::new("/etc/strata")), "/etc/strata");
    }
}
