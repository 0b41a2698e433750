//! Option identities, kinds and declarations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity of a configuration option: its group (INI section) and name.
///
/// Displayed and parsed in dotted form, `group.name`.
///
/// # Examples
///
/// ```
/// use strata::schema::OptionKey;
///
/// let key: OptionKey = "database.connection".parse().unwrap();
/// assert_eq!(key.group, "database");
/// assert_eq!(key.name, "connection");
/// assert_eq!(key.to_string(), "database.connection");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionKey {
    /// Group (section) the option lives in.
    pub group: String,
    /// Option name within the group.
    pub name: String,
}

impl OptionKey {
    /// Creates a key from a group and a name.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('.') {
            Some((group, name)) if !group.trim().is_empty() && !name.trim().is_empty() => {
                Ok(Self::new(group.trim(), name.trim()))
            }
            _ => Err(Error::Validation {
                field: s.to_string(),
                message: "expected an option key of the form 'group.name'".to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OptionKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<OptionKey> for String {
    fn from(key: OptionKey) -> Self {
        key.to_string()
    }
}

/// The declared type of an option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Free text.
    #[default]
    String,
    /// A signed integer.
    Integer,
    /// true/false, also 1/0, yes/no, on/off.
    Boolean,
    /// Comma-separated items.
    List,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Declaration of one option: identity, kind, default and deprecated names.
///
/// # Examples
///
/// ```
/// use strata::schema::{OptionKind, OptionSpec};
///
/// let spec = OptionSpec::new("database", "idle_timeout")
///     .kind(OptionKind::Integer)
///     .default_value("3600")
///     .deprecated_name("sql", "idle_timeout");
///
/// assert_eq!(spec.deprecated.len(), 1);
/// assert_eq!(spec.default.as_deref(), Some("3600"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// The current name of the option.
    pub key: OptionKey,
    /// The value type.
    pub kind: OptionKind,
    /// Default value as text, if any.
    pub default: Option<String>,
    /// Human-readable description.
    pub help: Option<String>,
    /// Older names that still map onto this option, in priority order.
    pub deprecated: Vec<OptionKey>,
}

impl OptionSpec {
    /// Declares a string option with no default.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: OptionKey::new(group, name),
            kind: OptionKind::String,
            default: None,
            help: None,
            deprecated: Vec::new(),
        }
    }

    /// Sets the value kind.
    #[must_use]
    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a deprecated name that resolves to this option.
    #[must_use]
    pub fn deprecated_name(mut self, group: impl Into<String>, name: impl Into<String>) -> Self {
        self.deprecated.push(OptionKey::new(group, name));
        self
    }
}

/// A backward-compatible rename: `deprecated` now means `current`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OptionAlias {
    /// The old name.
    pub deprecated: OptionKey,
    /// The name it was renamed to.
    pub current: OptionKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_key() {
        let key: OptionKey = "paste_deploy.config_file".parse().unwrap();
        assert_eq!(key, OptionKey::new("paste_deploy", "config_file"));
    }

    #[test]
    fn test_parse_option_key_splits_at_first_dot() {
        let key: OptionKey = "DEFAULT.a.b".parse().unwrap();
        assert_eq!(key.group, "DEFAULT");
        assert_eq!(key.name, "a.b");
    }

    #[test]
    fn test_parse_option_key_rejects_malformed() {
        assert!("database".parse::<OptionKey>().is_err());
        assert!(".connection".parse::<OptionKey>().is_err());
        assert!("database.".parse::<OptionKey>().is_err());
    }

    #[test]
    fn test_option_key_deserializes_from_string() {
        let key: OptionKey = serde_yaml::from_str("sql.connection").unwrap();
        assert_eq!(key, OptionKey::new("sql", "connection"));
    }

    #[test]
    fn test_option_kind_names() {
        let kind: OptionKind = serde_yaml::from_str("boolean").unwrap();
        assert_eq!(kind, OptionKind::Boolean);
        assert_eq!(OptionKind::Integer.to_string(), "integer");
    }
}
