//! Main entry point for the strata CLI.
//!
//! Inspects the configuration a server would resolve from its layered
//! config files:
//! - `show`: Print every resolved option
//! - `get`: Print one option
//! - `locate`: Find a file in a directory search path
//! - `find-descriptor`: Print the deployment descriptor location
//! - `validate`: Check a single configuration file

use clap::Parser;
use strata_cli::cli::{Cli, Command};
use strata_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = strata::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config_files: cli.config_files,
        config_dirs: cli.config_dirs,
        schema: cli.schema,
        project: cli.project,
        logger,
    };

    // Execute the command
    let result = match cli.command {
        Command::Show(cmd) => cmd.execute(&global),
        Command::Get(cmd) => cmd.execute(&global),
        Command::Locate(cmd) => cmd.execute(&global),
        Command::FindDescriptor(cmd) => cmd.execute(&global),
        Command::Validate(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
