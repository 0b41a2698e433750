//! INI-style `.conf` parsing.
//!
//! ```text
//! [database]
//! # comment
//! connection = sqlite://
//! idle_timeout: 200
//! description = first line
//!     continued line
//! ```
//!
//! `=` or `:` separates a key from its value (whichever comes first).
//! Lines starting with `#` or `;` are comments. An indented line directly
//! after an entry continues that entry's value. `[DEFAULT]` is an ordinary
//! group.

use std::path::Path;

use crate::config::source::ConfigEntry;
use crate::error::{Error, Result};

/// Parse INI text into entries, in file order.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] carrying `path` and the 1-based line for:
/// an entry before any section header, a malformed section header, a line
/// with no separator, or an empty key.
///
/// # Examples
///
/// ```
/// use strata::config::ini;
/// use std::path::Path;
///
/// let entries = ini::parse(Path::new("x.conf"), "[sql]\nconnection = sqlite://\n").unwrap();
/// assert_eq!(entries[0].group, "sql");
/// assert_eq!(entries[0].value, "sqlite://");
/// assert_eq!(entries[0].line, 2);
///
/// let err = ini::parse(Path::new("x.conf"), "connection = sqlite://\n").unwrap_err();
/// assert!(err.is_parse_error());
/// ```
pub fn parse(path: &Path, contents: &str) -> Result<Vec<ConfigEntry>> {
    let mut entries: Vec<ConfigEntry> = Vec::new();
    let mut group: Option<String> = None;
    let mut in_entry = false;

    for (index, raw) in contents.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            in_entry = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if in_entry && raw.starts_with(char::is_whitespace) {
            if let Some(last) = entries.last_mut() {
                if !last.value.is_empty() {
                    last.value.push('\n');
                }
                last.value.push_str(trimmed);
            }
            continue;
        }
        in_entry = false;

        if let Some(header) = trimmed.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| parse_error(path, line, "unterminated section header"))?
                .trim();
            if name.is_empty() {
                return Err(parse_error(path, line, "empty section name"));
            }
            group = Some(name.to_string());
            continue;
        }

        let Some(current) = group.as_deref() else {
            return Err(parse_error(
                path,
                line,
                "entry appears before any [section] header",
            ));
        };
        let (key, value) = split_entry(trimmed).ok_or_else(|| {
            parse_error(path, line, &format!("expected 'key = value', found '{trimmed}'"))
        })?;
        if key.is_empty() {
            return Err(parse_error(path, line, "empty option name"));
        }

        entries.push(ConfigEntry::new(current, key, value).at_line(line));
        in_entry = true;
    }

    Ok(entries)
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(['=', ':'])?;
    Some((line[..pos].trim(), line[pos + 1..].trim()))
}

fn parse_error(path: &Path, line: usize, detail: &str) -> Error {
    Error::ConfigParse {
        path: path.to_path_buf(),
        line,
        detail: detail.to_string(),
    }
}
