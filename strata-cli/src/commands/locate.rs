//! Locate command implementation.
//!
//! Runs the library's file locator directly: the first directory (in
//! command-line order) containing the name wins.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::path::PathBuf;
use strata::{FileLocator, SearchRequest};

/// Find a file in an ordered list of directories.
#[derive(Args)]
pub struct LocateCommand {
    /// File name to look for
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory to search, highest priority first (repeatable)
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Look for a directory instead of a regular file
    #[arg(long)]
    pub directory: bool,
}

impl LocateCommand {
    /// Execute the locate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.name.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "file name must not be empty".to_string(),
            ));
        }

        let mut request = SearchRequest::new(self.name).with_dirs(self.dirs);
        if self.directory {
            request = request.directories();
        }

        global
            .logger
            .debug(&format!("Searching {} directories", request.dirs.len()));
        let found = FileLocator::locate(&request)?;
        println!("{}", found.display());
        Ok(())
    }
}
