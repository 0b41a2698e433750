//! The resolved, immutable configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::config::source::SourceOrigin;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use crate::schema::{OptionKey, OptionSpec};

/// Which spelling of an option produced a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum NameForm {
    /// The option's current name.
    Current,
    /// A deprecated name mapped onto the current one.
    DeprecatedAlias {
        /// The deprecated name that was written in the source.
        name: OptionKey,
    },
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum Provenance {
    /// Set by a configuration layer.
    Layer {
        /// Position of the layer in the chain (0 = first, lowest priority).
        index: usize,
        /// The layer's source.
        source: SourceOrigin,
        /// Line of the winning entry; 0 when unknown.
        line: usize,
        /// The spelling that was used.
        name: NameForm,
    },
    /// No layer set the option; the schema default applies.
    Default,
}

/// The final binding of one declared option.
///
/// A layer-provided value always has a value; a default-provided value has
/// one only if the schema declares a default. A value is never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    value: Option<String>,
    provenance: Provenance,
}

impl ResolvedValue {
    pub(crate) fn from_layer(
        value: String,
        index: usize,
        source: SourceOrigin,
        line: usize,
        name: NameForm,
    ) -> Self {
        Self {
            value: Some(value),
            provenance: Provenance::Layer {
                index,
                source,
                line,
                name,
            },
        }
    }

    pub(crate) fn from_default(spec: &OptionSpec) -> Self {
        Self {
            value: spec.default.clone(),
            provenance: Provenance::Default,
        }
    }

    /// The value text, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Where the value came from.
    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Returns true if a layer set the value (rather than the default).
    #[must_use]
    pub fn is_from_layer(&self) -> bool {
        matches!(self.provenance, Provenance::Layer { .. })
    }

    /// Returns true if the value was written under a deprecated name.
    #[must_use]
    pub fn is_deprecated_alias(&self) -> bool {
        matches!(
            self.provenance,
            Provenance::Layer {
                name: NameForm::DeprecatedAlias { .. },
                ..
            }
        )
    }
}

/// Effective configuration: one [`ResolvedValue`] per declared option.
///
/// Built once by the resolver and never mutated; a reload produces a new
/// instance (see [`ConfigStore`](crate::config::ConfigStore)).
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigBuilder, ConfigEntry};
/// use strata::server_schema;
///
/// let schema = server_schema().unwrap();
/// let config = ConfigBuilder::new()
///     .with_override("sql", "connection", "sqlite://deprecated")
///     .build(&schema)
///     .unwrap();
///
/// assert_eq!(
///     config.get_str("database", "connection").unwrap(),
///     Some("sqlite://deprecated")
/// );
/// assert!(config.get("database", "conection").unwrap_err().is_unknown_option());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    options: BTreeMap<OptionKey, ResolvedValue>,
    sources: Vec<SourceOrigin>,
    unrecognized: Vec<OptionKey>,
}

impl ResolvedConfiguration {
    pub(crate) fn new(
        options: BTreeMap<OptionKey, ResolvedValue>,
        sources: Vec<SourceOrigin>,
        unrecognized: Vec<OptionKey>,
    ) -> Self {
        Self {
            options,
            sources,
            unrecognized,
        }
    }

    /// Look up an option by group and name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] if the schema did not declare it.
    pub fn get(&self, group: &str, key: &str) -> Result<&ResolvedValue> {
        self.get_key(&OptionKey::new(group, key))
    }

    /// Look up an option by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] if the schema did not declare it.
    pub fn get_key(&self, key: &OptionKey) -> Result<&ResolvedValue> {
        self.options.get(key).ok_or_else(|| Error::UnknownOption {
            group: key.group.clone(),
            key: key.name.clone(),
        })
    }

    /// The value text, or `None` if unset with no default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] for undeclared options.
    pub fn get_str(&self, group: &str, key: &str) -> Result<Option<&str>> {
        Ok(self.get(group, key)?.value())
    }

    /// The value as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] for undeclared options and
    /// [`Error::InvalidValue`] if the text is not a boolean.
    pub fn get_bool(&self, group: &str, key: &str) -> Result<Option<bool>> {
        let option = OptionKey::new(group, key);
        self.get_key(&option)?
            .value()
            .map(|v| ConfigValidator::parse_bool(&option, v))
            .transpose()
    }

    /// The value as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] for undeclared options and
    /// [`Error::InvalidValue`] if the text is not an integer.
    pub fn get_int(&self, group: &str, key: &str) -> Result<Option<i64>> {
        let option = OptionKey::new(group, key);
        self.get_key(&option)?
            .value()
            .map(|v| ConfigValidator::parse_int(&option, v))
            .transpose()
    }

    /// The value as a comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOption`] for undeclared options.
    pub fn get_list(&self, group: &str, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.get(group, key)?.value().map(ConfigValidator::parse_list))
    }

    /// All options, ordered by group then name.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &ResolvedValue)> {
        self.options.iter()
    }

    /// The layers this configuration was built from, in chain order.
    #[must_use]
    pub fn sources(&self) -> &[SourceOrigin] {
        &self.sources
    }

    /// Paths of the file-backed layers, in chain order.
    pub fn file_sources(&self) -> impl DoubleEndedIterator<Item = &Path> {
        self.sources.iter().filter_map(|origin| match origin {
            SourceOrigin::File(path) => Some(path.as_path()),
            SourceOrigin::Inline(_) => None,
        })
    }

    /// Keys that some layer set but the schema does not know, sorted.
    #[must_use]
    pub fn unrecognized(&self) -> &[OptionKey] {
        &self.unrecognized
    }

    /// Number of declared options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the schema declared nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
