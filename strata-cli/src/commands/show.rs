//! Show command implementation.
//!
//! This module implements the `show` command, which prints the effective
//! value of every declared option, optionally with where it came from.

use crate::error::CliError;
use crate::utils::{resolve, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use std::collections::BTreeMap;
use std::io::Write;
use strata::config::{NameForm, Provenance, ResolvedValue, SourceOrigin};
use strata::ResolvedConfiguration;

/// Print every resolved option.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "STRATA_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Include where each value came from
    #[arg(long)]
    pub provenance: bool,
}

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `[group] name = value` line per option
    Human,
    /// JSON object
    Json,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = resolve(global)?;

        let output = match self.format {
            OutputFormat::Human => format_human(&config, self.provenance),
            OutputFormat::Json => format_json(&config, self.provenance)?,
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{output}")?;
        Ok(())
    }
}

fn format_human(config: &ResolvedConfiguration, provenance: bool) -> String {
    let mut lines = Vec::with_capacity(config.len());
    let mut group = None;

    for (key, resolved) in config.iter() {
        if group != Some(key.group.as_str()) {
            if group.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("[{}]", key.group));
            group = Some(key.group.as_str());
        }

        let mut line = match resolved.value() {
            Some(value) => format!("{} = {value}", key.name),
            None => format!("# {} is not set", key.name),
        };
        if provenance {
            line.push_str(&format!("  # {}", describe(resolved)));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn describe(resolved: &ResolvedValue) -> String {
    match resolved.provenance() {
        Provenance::Default => "default".to_string(),
        Provenance::Layer {
            source, line, name, ..
        } => {
            let location = match source {
                SourceOrigin::File(path) if *line > 0 => {
                    format!("{}:{line}", shorten_path(path))
                }
                SourceOrigin::File(path) => shorten_path(path),
                SourceOrigin::Inline(_) => source.to_string(),
            };
            match name {
                NameForm::Current => location,
                NameForm::DeprecatedAlias { name } => {
                    format!("{location}, deprecated name [{}] {}", name.group, name.name)
                }
            }
        }
    }
}

fn format_json(config: &ResolvedConfiguration, provenance: bool) -> Result<String, CliError> {
    if provenance {
        return Ok(serde_json::to_string_pretty(config)?);
    }

    let values: BTreeMap<String, Option<&str>> = config
        .iter()
        .map(|(key, resolved)| (key.to_string(), resolved.value()))
        .collect();
    Ok(serde_json::to_string_pretty(&values)?)
}
