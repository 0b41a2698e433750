//! Value conversion and validation against option kinds.

use crate::config::resolved::ResolvedConfiguration;
use crate::error::{Error, Result};
use crate::schema::{OptionKey, OptionKind, OptionSchema};

/// Checks resolved values against their declared [`OptionKind`].
///
/// The typed getters of [`ResolvedConfiguration`] use the same conversions,
/// so a configuration that validated never fails a getter of its own kind.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate every bound value of `config` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvalidValue`], in declaration order.
    pub fn validate(config: &ResolvedConfiguration, schema: &OptionSchema) -> Result<()> {
        for spec in schema.options() {
            if let Some(value) = config.get_key(&spec.key)?.value() {
                Self::check_kind(&spec.key, spec.kind, value)?;
            }
        }
        Ok(())
    }

    /// Check that `value` converts to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if it does not.
    pub fn check_kind(key: &OptionKey, kind: OptionKind, value: &str) -> Result<()> {
        match kind {
            OptionKind::String | OptionKind::List => Ok(()),
            OptionKind::Integer => Self::parse_int(key, value).map(|_| ()),
            OptionKind::Boolean => Self::parse_bool(key, value).map(|_| ()),
        }
    }

    /// Parse a boolean.
    ///
    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for anything else.
    pub fn parse_bool(key: &OptionKey, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(invalid(key, value, "a boolean (true/false/1/0/yes/no/on/off)")),
        }
    }

    /// Parse a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if `value` is not an integer.
    pub fn parse_int(key: &OptionKey, value: &str) -> Result<i64> {
        value
            .trim()
            .parse()
            .map_err(|_| invalid(key, value, "an integer"))
    }

    /// Split a comma-separated list, trimming items and dropping empty ones.
    #[must_use]
    pub fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn invalid(key: &OptionKey, value: &str, expected: &str) -> Error {
    Error::InvalidValue {
        group: key.group.clone(),
        key: key.name.clone(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
