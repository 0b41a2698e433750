//! Command to validate a single configuration file.

use crate::error::CliError;
use crate::utils::{load_schema, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::ConfigBuilder;

/// Check a single configuration file against the schema.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// Parse errors and values of the wrong kind propagate with their own
    /// exit codes. Unrecognized options are listed and fail validation,
    /// although normal resolution only ignores them.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        match std::fs::metadata(&self.config_path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(CliError::InvalidArguments(format!(
                    "Not a file: {}",
                    self.config_path.display()
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CliError::InvalidArguments(format!(
                    "File not found: {}",
                    self.config_path.display()
                )));
            }
            Err(e) => return Err(CliError::Io(e)),
        }

        // 2. Parse and resolve the file on its own
        let schema = load_schema(global)?;
        let config = ConfigBuilder::new()
            .with_file(&self.config_path)
            .build(&schema)?;

        // 3. Report options the schema does not know
        let unknown = config.unrecognized();
        if !unknown.is_empty() {
            for key in unknown {
                eprintln!("Unknown option: [{}] {}", key.group, key.name);
            }
            return Err(CliError::SemanticFailure(format!(
                "Configuration has {} unknown option(s)",
                unknown.len()
            )));
        }

        let deprecated = config
            .iter()
            .filter(|(_, resolved)| resolved.is_deprecated_alias())
            .count();
        if deprecated > 0 {
            global.logger.warn(&format!(
                "{deprecated} option(s) set under deprecated names"
            ));
        }

        if !global.quiet {
            println!("Configuration is valid");
        }
        Ok(())
    }
}
