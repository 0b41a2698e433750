//! Command to print the location of the deployment descriptor.

use crate::error::CliError;
use crate::utils::{parse_option_key, resolve, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use strata::DescriptorLocator;

/// Print the location of the deployment descriptor.
#[derive(Args)]
pub struct FindDescriptorCommand {
    /// Option naming the descriptor file, as group.key
    #[arg(long, value_name = "OPTION", default_value = "paste_deploy.config_file")]
    pub option: String,

    /// Directory searched after the config file directories (repeatable)
    #[arg(long = "fallback-dir", value_name = "DIR")]
    pub fallback_dirs: Vec<PathBuf>,
}

impl FindDescriptorCommand {
    /// Execute the find-descriptor command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let option = parse_option_key(&self.option)?;
        let config = resolve(global)?;

        let locator = self
            .fallback_dirs
            .into_iter()
            .fold(DescriptorLocator::for_option(option), |locator, dir| {
                locator.with_fallback_dir(dir)
            });

        for dir in locator.search_dirs(&config) {
            global.logger.debug(&format!("Search directory: {}", dir.display()));
        }

        let found = locator.locate(&config)?;
        println!("{}", found.display());
        Ok(())
    }
}
