//! YAML configuration sources.
//!
//! A YAML source is a mapping of group to a mapping of option name to value:
//!
//! ```yaml
//! database:
//!   connection: sqlite://
//!   idle_timeout: 200
//! profiler:
//!   hmac_keys: [one, two]
//! ```
//!
//! Scalars become their text form, sequences of scalars are joined with
//! `,` (the list syntax), and null values are skipped. `serde_yaml::Value`
//! keeps no positions, so entries carry line 0.

use std::path::Path;

use serde_yaml::Value;

use crate::config::source::ConfigEntry;
use crate::error::{Error, Result};

/// Parse YAML text into entries, in document order.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] for invalid YAML (with the line reported by
/// `serde_yaml`, or 0) and for documents that are not a group-to-options
/// mapping of scalars.
pub fn parse(path: &Path, contents: &str) -> Result<Vec<ConfigEntry>> {
    let document: Value = serde_yaml::from_str(contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        line: e.location().map_or(0, |loc| loc.line()),
        detail: format!("invalid YAML: {e}"),
    })?;

    let groups = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(groups) => groups,
        _ => return Err(shape_error(path, "top level must be a mapping of groups")),
    };

    let mut entries = Vec::new();
    for (group, options) in groups {
        let group = scalar_text(&group)
            .ok_or_else(|| shape_error(path, "group names must be scalars"))?;
        let options = match options {
            Value::Null => continue,
            Value::Mapping(options) => options,
            _ => {
                return Err(shape_error(
                    path,
                    &format!("group '{group}' must be a mapping of options"),
                ))
            }
        };

        for (key, value) in options {
            let key = scalar_text(&key)
                .ok_or_else(|| shape_error(path, "option names must be scalars"))?;
            let text = match &value {
                Value::Null => continue,
                Value::Sequence(items) => items
                    .iter()
                    .map(scalar_text)
                    .collect::<Option<Vec<_>>>()
                    .map(|items| items.join(",")),
                other => scalar_text(other),
            }
            .ok_or_else(|| {
                shape_error(
                    path,
                    &format!("value of {group}.{key} must be a scalar or a list of scalars"),
                )
            })?;
            entries.push(ConfigEntry::new(group.clone(), key, text));
        }
    }

    Ok(entries)
}

/// Text form of a YAML scalar; `None` for anything else.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn shape_error(path: &Path, detail: &str) -> Error {
    Error::ConfigParse {
        path: path.to_path_buf(),
        line: 0,
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(contents: &str) -> Result<Vec<ConfigEntry>> {
        parse(Path::new("test.yaml"), contents)
    }

    #[test]
    fn test_groups_and_scalars() {
        let entries = parse_str(
            "database:\n  connection: sqlite://\n  idle_timeout: 200\nprofiler:\n  enabled: true\n",
        )
        .unwrap();
        let triples: Vec<_> = entries
            .iter()
            .map(|e| (e.group.as_str(), e.key.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("database", "connection", "sqlite://"),
                ("database", "idle_timeout", "200"),
                ("profiler", "enabled", "true"),
            ]
        );
    }

    #[test]
    fn test_sequences_join_as_lists() {
        let entries = parse_str("profiler:\n  hmac_keys: [one, two]\n").unwrap();
        assert_eq!(entries[0].value, "one,two");
    }

    #[test]
    fn test_nulls_skipped() {
        let entries = parse_str("auth:\n  password: ~\nempty:\n").unwrap();
        assert!(entries.is_empty());
        assert!(parse_str("").unwrap().is_empty());
    }

    #[test]
    fn test_nested_mapping_rejected() {
        let err = parse_str("database:\n  connection:\n    url: x\n").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_top_level_list_rejected() {
        assert!(parse_str("- a\n- b\n").is_err());
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_str("database:\n  connection: [unclosed\n").unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert!(line > 0),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
