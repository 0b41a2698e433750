//! Command to print a single option value.

use crate::error::CliError;
use crate::utils::{parse_option_key, resolve, GlobalOptions};
use clap::Args;

/// Print the value of one option.
#[derive(Args)]
pub struct GetCommand {
    /// Option to print, as group.key (e.g. database.connection)
    #[arg(value_name = "OPTION")]
    pub option: String,
}

impl GetCommand {
    /// Execute the get command.
    ///
    /// An option that is unset and has no default is a semantic failure, so
    /// scripts can tell it apart from an empty value.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key = parse_option_key(&self.option)?;
        let config = resolve(global)?;

        let resolved = config.get_key(&key)?;
        if resolved.is_deprecated_alias() {
            global.logger.debug(&format!("{key} was set under a deprecated name"));
        }

        match resolved.value() {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(CliError::SemanticFailure(format!("{key} is not set"))),
        }
    }
}
