//! Build script for strata-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("strata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect layered server configuration")
        .long_about(
            "Resolve layered configuration files, including options set under deprecated names, \
             and locate the files a server loads at startup",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .help("Configuration file, lowest priority first (repeatable)")
                .value_name("PATH")
                .global(true)
                .action(ArgAction::Append)
                .env("STRATA_CONFIG_FILE"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory of *.conf files applied after the config files (repeatable)")
                .value_name("DIR")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("schema")
                .long("schema")
                .help("YAML option schema (default: built-in server schema)")
                .value_name("PATH")
                .global(true)
                .env("STRATA_SCHEMA"),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .help("Project name used to discover config files when none are given")
                .value_name("NAME")
                .global(true)
                .default_value("strata"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Print every resolved option")
                .long_about("Print the effective value of every declared option, optionally with its source"),
            Command::new("get")
                .about("Print the value of one option")
                .long_about("Print the effective value of a single option given as group.key"),
            Command::new("locate")
                .about("Find a file in an ordered list of directories")
                .long_about("Print the first directory entry matching a name, searching directories in order"),
            Command::new("find-descriptor")
                .about("Print the location of the deployment descriptor")
                .long_about("Locate the file named by [paste_deploy] config_file next to the config files"),
            Command::new("validate")
                .about("Check a single configuration file against the schema")
                .long_about("Parse a configuration file and report malformed lines, bad values and unknown options"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("strata.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
