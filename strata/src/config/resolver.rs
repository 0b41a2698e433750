//! Layer merging and deprecated-name reconciliation.
//!
//! Resolution runs in two passes so the override rules stay auditable:
//!
//! 1. [`LayerIndex::build`] walks the layers in chain order and records, for
//!    every `(group, key)` spelling that appears, the last layer that set it.
//!    This alone is plain last-layer-wins.
//! 2. [`DeprecationResolver::resolve`] visits each declared option and picks
//!    between its current name and its deprecated names:
//!    - a current-name value always wins, even when a deprecated name appears
//!      in a later layer (or later in the same layer);
//!    - otherwise the deprecated name set by the highest layer wins, binding
//!      to the current name with [`NameForm::DeprecatedAlias`] provenance
//!      (ties within one layer go to the alias declared first);
//!    - otherwise the schema default applies.
//!
//! Keys that are neither declared nor deprecated names are reported as
//! unrecognized and never exposed as values.

use std::collections::{BTreeMap, HashMap};

use crate::config::resolved::{NameForm, ResolvedConfiguration, ResolvedValue};
use crate::config::source::ConfigSource;
use crate::schema::{OptionKey, OptionSchema, OptionSpec};

/// The last layer that set a given spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerHit {
    /// Position of the layer in the chain.
    pub layer: usize,
    /// The value it set.
    pub value: String,
    /// Line of the entry within the layer.
    pub line: usize,
}

/// Per-spelling last values across all layers (the first pass).
#[derive(Debug, Default)]
pub struct LayerIndex {
    last: HashMap<OptionKey, LayerHit>,
}

impl LayerIndex {
    /// Index `sources` in chain order; later entries replace earlier ones.
    #[must_use]
    pub fn build(sources: &[ConfigSource]) -> Self {
        let mut last = HashMap::new();
        for (layer, source) in sources.iter().enumerate() {
            for entry in &source.entries {
                last.insert(
                    OptionKey::new(entry.group.as_str(), entry.key.as_str()),
                    LayerHit {
                        layer,
                        value: entry.value.clone(),
                        line: entry.line,
                    },
                );
            }
        }
        Self { last }
    }

    /// The last layer that set `key`, if any.
    #[must_use]
    pub fn last_set(&self, key: &OptionKey) -> Option<&LayerHit> {
        self.last.get(key)
    }

    /// Every spelling seen in any layer.
    pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
        self.last.keys()
    }
}

/// Reconciles deprecated and current option names across layers.
///
/// # Examples
///
/// ```
/// use strata::config::{ConfigEntry, ConfigSource, DeprecationResolver};
/// use strata::schema::{OptionSchema, OptionSpec};
///
/// let schema = OptionSchema::from_specs([
///     OptionSpec::new("database", "connection").deprecated_name("sql", "connection"),
/// ])
/// .unwrap();
///
/// let layers = vec![
///     ConfigSource::inline("one", vec![ConfigEntry::new("database", "connection", "sqlite://new")]),
///     ConfigSource::inline("two", vec![ConfigEntry::new("sql", "connection", "sqlite://deprecated")]),
/// ];
///
/// let config = DeprecationResolver::new(&schema).resolve(&layers);
/// // The current name wins even though the deprecated one comes later.
/// assert_eq!(config.get_str("database", "connection").unwrap(), Some("sqlite://new"));
/// ```
pub struct DeprecationResolver<'a> {
    schema: &'a OptionSchema,
}

impl<'a> DeprecationResolver<'a> {
    /// Creates a resolver for `schema`.
    #[must_use]
    pub fn new(schema: &'a OptionSchema) -> Self {
        Self { schema }
    }

    /// Resolve `sources` (in chain order) into a configuration.
    ///
    /// Never fails: every ambiguity has a deterministic winner.
    #[must_use]
    pub fn resolve(&self, sources: &[ConfigSource]) -> ResolvedConfiguration {
        let index = LayerIndex::build(sources);

        let options: BTreeMap<OptionKey, ResolvedValue> = self
            .schema
            .options()
            .map(|spec| (spec.key.clone(), Self::resolve_option(spec, &index, sources)))
            .collect();

        let mut unrecognized: Vec<OptionKey> = index
            .keys()
            .filter(|key| !self.schema.contains(key) && self.schema.current_name_for(key).is_none())
            .cloned()
            .collect();
        unrecognized.sort();
        for key in &unrecognized {
            log::debug!("ignoring unrecognized option {key}");
        }

        ResolvedConfiguration::new(
            options,
            sources.iter().map(|s| s.origin.clone()).collect(),
            unrecognized,
        )
    }

    fn resolve_option(spec: &OptionSpec, index: &LayerIndex, sources: &[ConfigSource]) -> ResolvedValue {
        if let Some(hit) = index.last_set(&spec.key) {
            return Self::bind(hit, sources, NameForm::Current);
        }

        let mut winner: Option<(&OptionKey, &LayerHit)> = None;
        for old in &spec.deprecated {
            if let Some(hit) = index.last_set(old) {
                // Strictly greater keeps the first-declared alias on a same-layer tie.
                if winner.map_or(true, |(_, best)| hit.layer > best.layer) {
                    winner = Some((old, hit));
                }
            }
        }

        match winner {
            Some((old, hit)) => {
                log::warn!(
                    "option {old} is deprecated; use {} instead",
                    spec.key
                );
                Self::bind(hit, sources, NameForm::DeprecatedAlias { name: old.clone() })
            }
            None => ResolvedValue::from_default(spec),
        }
    }

    fn bind(hit: &LayerHit, sources: &[ConfigSource], name: NameForm) -> ResolvedValue {
        ResolvedValue::from_layer(
            hit.value.clone(),
            hit.layer,
            sources[hit.layer].origin.clone(),
            hit.line,
            name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolved::Provenance;
    use crate::config::source::{ConfigEntry, SourceOrigin};
    use std::path::PathBuf;

    fn schema() -> OptionSchema {
        OptionSchema::from_specs([
            OptionSpec::new("database", "connection")
                .deprecated_name("sql", "connection")
                .deprecated_name("DEFAULT", "sql_connection"),
            OptionSpec::new("database", "idle_timeout")
                .default_value("3600")
                .deprecated_name("sql", "idle_timeout"),
            OptionSpec::new("paste_deploy", "config_file").default_value("strata-paste.ini"),
            OptionSpec::new("auth", "password"),
        ])
        .unwrap()
    }

    fn layer(name: &str, entries: &[(&str, &str, &str)]) -> ConfigSource {
        ConfigSource::from_file(
            PathBuf::from(name),
            entries
                .iter()
                .enumerate()
                .map(|(i, (g, k, v))| ConfigEntry::new(*g, *k, *v).at_line(i + 1))
                .collect(),
        )
    }

    fn value(config: &ResolvedConfiguration, group: &str, key: &str) -> Option<String> {
        config.get_str(group, key).unwrap().map(str::to_string)
    }

    #[test]
    fn test_deprecated_only() {
        let schema = schema();
        let layers = vec![
            layer("base.conf", &[]),
            layer(
                "deprecated.conf",
                &[("sql", "connection", "sqlite://deprecated"), ("sql", "idle_timeout", "54321")],
            ),
        ];
        let config = DeprecationResolver::new(&schema).resolve(&layers);

        assert_eq!(value(&config, "database", "connection").as_deref(), Some("sqlite://deprecated"));
        assert_eq!(value(&config, "database", "idle_timeout").as_deref(), Some("54321"));

        let connection = config.get("database", "connection").unwrap();
        assert_eq!(
            connection.provenance(),
            &Provenance::Layer {
                index: 1,
                source: SourceOrigin::File(PathBuf::from("deprecated.conf")),
                line: 1,
                name: NameForm::DeprecatedAlias {
                    name: OptionKey::new("sql", "connection"),
                },
            }
        );
    }

    #[test]
    fn test_deprecated_then_current() {
        let schema = schema();
        let layers = vec![
            layer("one.conf", &[("sql", "connection", "sqlite://deprecated")]),
            layer("two.conf", &[("database", "connection", "sqlite://new")]),
        ];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(value(&config, "database", "connection").as_deref(), Some("sqlite://new"));
        assert!(!config.get("database", "connection").unwrap().is_deprecated_alias());
    }

    #[test]
    fn test_current_beats_later_deprecated() {
        let schema = schema();
        let layers = vec![
            layer("one.conf", &[("database", "connection", "sqlite://new")]),
            layer("two.conf", &[("sql", "connection", "sqlite://deprecated")]),
        ];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(value(&config, "database", "connection").as_deref(), Some("sqlite://new"));
    }

    #[test]
    fn test_same_layer_current_wins_regardless_of_order() {
        let schema = schema();
        let layers = vec![layer(
            "override.conf",
            &[
                ("database", "idle_timeout", "65432"),
                ("sql", "idle_timeout", "54321"),
            ],
        )];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(config.get_int("database", "idle_timeout").unwrap(), Some(65432));
    }

    #[test]
    fn test_highest_layer_deprecated_name_wins() {
        let schema = schema();
        let layers = vec![
            layer("one.conf", &[("DEFAULT", "sql_connection", "sqlite://oldest")]),
            layer("two.conf", &[("sql", "connection", "sqlite://older")]),
            layer("three.conf", &[("DEFAULT", "sql_connection", "sqlite://old")]),
        ];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(value(&config, "database", "connection").as_deref(), Some("sqlite://old"));
    }

    #[test]
    fn test_same_layer_alias_tie_goes_to_first_declared() {
        let schema = schema();
        let layers = vec![layer(
            "one.conf",
            &[
                ("DEFAULT", "sql_connection", "sqlite://second-alias"),
                ("sql", "connection", "sqlite://first-alias"),
            ],
        )];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(value(&config, "database", "connection").as_deref(), Some("sqlite://first-alias"));
    }

    #[test]
    fn test_last_layer_wins_without_alias() {
        let schema = schema();
        let layers = vec![
            layer("one.conf", &[("paste_deploy", "config_file", "v1.ini")]),
            layer("two.conf", &[("paste_deploy", "config_file", "v2.ini")]),
        ];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(value(&config, "paste_deploy", "config_file").as_deref(), Some("v2.ini"));
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        let schema = schema();
        let config = DeprecationResolver::new(&schema).resolve(&[]);
        assert_eq!(config.len(), 4);
        assert_eq!(value(&config, "database", "idle_timeout").as_deref(), Some("3600"));
        assert_eq!(value(&config, "auth", "password"), None);
        assert_eq!(
            config.get("auth", "password").unwrap().provenance(),
            &Provenance::Default
        );
    }

    #[test]
    fn test_unrecognized_keys_reported_not_exposed() {
        let schema = schema();
        let layers = vec![layer(
            "one.conf",
            &[("database", "conection", "typo"), ("sql", "connection", "x")],
        )];
        let config = DeprecationResolver::new(&schema).resolve(&layers);
        assert_eq!(config.unrecognized(), &[OptionKey::new("database", "conection")]);
        assert!(config.get("database", "conection").unwrap_err().is_unknown_option());
        assert!(config.get("sql", "connection").unwrap_err().is_unknown_option());
    }

    #[test]
    fn test_layer_index_keeps_last() {
        let layers = vec![
            layer("one.conf", &[("a", "b", "1"), ("a", "b", "2")]),
            layer("two.conf", &[("a", "c", "3")]),
        ];
        let index = LayerIndex::build(&layers);
        let hit = index.last_set(&OptionKey::new("a", "b")).unwrap();
        assert_eq!(hit.layer, 0);
        assert_eq!(hit.value, "2");
        assert_eq!(hit.line, 2);
        assert_eq!(index.keys().count(), 2);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let schema = schema();
        let layers = vec![
            layer("one.conf", &[("sql", "connection", "a"), ("x", "y", "z")]),
            layer("two.conf", &[("database", "idle_timeout", "5")]),
        ];
        let resolver = DeprecationResolver::new(&schema);
        assert_eq!(resolver.resolve(&layers), resolver.resolve(&layers));
    }
}
