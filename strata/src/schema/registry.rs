//! The option registry: which options exist and which old names map onto them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::validator::ConfigValidator;
use crate::config::yaml::scalar_text;
use crate::error::{Error, Result};
use crate::schema::option::{OptionAlias, OptionKey, OptionKind, OptionSpec};

/// Declared options and their deprecated aliases.
///
/// The registry is the contract the resolver works against: only declared
/// options resolve, and every deprecated name maps to exactly one current
/// option. Declarations keep their registration order.
///
/// # Examples
///
/// ```
/// use strata::schema::{OptionKey, OptionSchema, OptionSpec};
///
/// let mut schema = OptionSchema::new();
/// schema
///     .register(OptionSpec::new("database", "connection").deprecated_name("sql", "connection"))
///     .unwrap();
///
/// let old = OptionKey::new("sql", "connection");
/// assert_eq!(
///     schema.current_name_for(&old),
///     Some(&OptionKey::new("database", "connection"))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSchema {
    options: Vec<OptionSpec>,
    index: HashMap<OptionKey, usize>,
    renames: HashMap<OptionKey, OptionKey>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    options: Vec<OptionDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionDecl {
    key: OptionKey,
    #[serde(default)]
    kind: OptionKind,
    #[serde(default)]
    default: Option<serde_yaml::Value>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    deprecated: Vec<OptionKey>,
}

impl OptionSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from declarations, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] on the first conflicting declaration.
    pub fn from_specs(specs: impl IntoIterator<Item = OptionSpec>) -> Result<Self> {
        let mut schema = Self::new();
        for spec in specs {
            schema.register(spec)?;
        }
        Ok(schema)
    }

    /// Declares one option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the option or one of its deprecated names
    /// is already declared or already used as an alias, if an option lists
    /// itself as deprecated, if its default does not fit its kind, or if a
    /// group contains `.` (keys are written `group.name`, split at the first
    /// dot).
    pub fn register(&mut self, spec: OptionSpec) -> Result<()> {
        for key in std::iter::once(&spec.key).chain(&spec.deprecated) {
            if key.group.is_empty() || key.name.is_empty() || key.group.contains('.') {
                return Err(schema_error(format!(
                    "invalid option name [{}] {}: the group must be non-empty and contain no '.'",
                    key.group, key.name
                )));
            }
        }
        if self.index.contains_key(&spec.key) {
            return Err(schema_error(format!("option {} declared twice", spec.key)));
        }
        if let Some(owner) = self.renames.get(&spec.key) {
            return Err(schema_error(format!(
                "option {} is already a deprecated name of {owner}",
                spec.key
            )));
        }
        for old in &spec.deprecated {
            if *old == spec.key {
                return Err(schema_error(format!(
                    "option {} lists itself as deprecated",
                    spec.key
                )));
            }
            if self.index.contains_key(old) {
                return Err(schema_error(format!(
                    "deprecated name {old} of {} is a declared option",
                    spec.key
                )));
            }
            if let Some(owner) = self.renames.get(old) {
                return Err(schema_error(format!(
                    "deprecated name {old} already maps to {owner}"
                )));
            }
        }
        if spec.deprecated.len() > 1 {
            let mut seen = spec.deprecated.clone();
            seen.sort();
            seen.dedup();
            if seen.len() != spec.deprecated.len() {
                return Err(schema_error(format!(
                    "option {} repeats a deprecated name",
                    spec.key
                )));
            }
        }
        if let Some(default) = &spec.default {
            ConfigValidator::check_kind(&spec.key, spec.kind, default)?;
        }

        for old in &spec.deprecated {
            self.renames.insert(old.clone(), spec.key.clone());
        }
        self.index.insert(spec.key.clone(), self.options.len());
        self.options.push(spec);
        Ok(())
    }

    /// Parses a schema from YAML text.
    ///
    /// ```
    /// use strata::schema::OptionSchema;
    ///
    /// let schema = OptionSchema::from_yaml_str(
    ///     "options:\n  - key: database.idle_timeout\n    kind: integer\n    default: 3600\n    deprecated: [sql.idle_timeout]\n",
    /// )
    /// .unwrap();
    /// assert_eq!(schema.len(), 1);
    /// assert_eq!(schema.aliases().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the YAML is invalid or a declaration conflicts.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml::from_str(contents)
            .map_err(|e| schema_error(format!("invalid schema YAML: {e}")))?;

        let mut schema = Self::new();
        for decl in file.options {
            let default = match &decl.default {
                None | Some(serde_yaml::Value::Null) => None,
                Some(value) => Some(scalar_text(value).ok_or_else(|| {
                    schema_error(format!("default of {} must be a scalar", decl.key))
                })?),
            };
            schema.register(OptionSpec {
                key: decl.key,
                kind: decl.kind,
                default,
                help: decl.help,
                deprecated: decl.deprecated,
            })?;
        }
        Ok(schema)
    }

    /// Loads a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Schema`]
    /// if its contents are invalid.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Looks up a declared option.
    #[must_use]
    pub fn get(&self, key: &OptionKey) -> Option<&OptionSpec> {
        self.index.get(key).map(|&i| &self.options[i])
    }

    /// Returns true if `key` is a declared (current) option name.
    #[must_use]
    pub fn contains(&self, key: &OptionKey) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current name a deprecated name maps to.
    #[must_use]
    pub fn current_name_for(&self, deprecated: &OptionKey) -> Option<&OptionKey> {
        self.renames.get(deprecated)
    }

    /// Declared options in registration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    /// Every deprecated-to-current mapping, in declaration order.
    #[must_use]
    pub fn aliases(&self) -> Vec<OptionAlias> {
        self.options
            .iter()
            .flat_map(|spec| {
                spec.deprecated.iter().map(|old| OptionAlias {
                    deprecated: old.clone(),
                    current: spec.key.clone(),
                })
            })
            .collect()
    }

    /// Number of declared options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

fn schema_error(message: String) -> Error {
    Error::Schema { message }
}
