//! Property-based tests for layer merging and alias resolution.

use super::resolver::DeprecationResolver;
use super::source::{ConfigEntry, ConfigSource};
use crate::schema::{OptionSchema, OptionSpec};
use proptest::prelude::*;

fn schema() -> OptionSchema {
    OptionSchema::from_specs([
        OptionSpec::new("database", "connection").deprecated_name("sql", "connection"),
        OptionSpec::new("paste_deploy", "config_file"),
    ])
    .unwrap()
}

#[derive(Debug, Clone, Copy)]
enum Spelling {
    Current,
    Deprecated,
    Unrelated,
}

fn entry(spelling: Spelling, value: &str) -> ConfigEntry {
    match spelling {
        Spelling::Current => ConfigEntry::new("database", "connection", value),
        Spelling::Deprecated => ConfigEntry::new("sql", "connection", value),
        Spelling::Unrelated => ConfigEntry::new("paste_deploy", "config_file", value),
    }
}

// Layers of (spelling, value) entries
fn layers_strategy() -> impl Strategy<Value = Vec<Vec<(Spelling, String)>>> {
    let spelling = prop_oneof![
        Just(Spelling::Current),
        Just(Spelling::Deprecated),
        Just(Spelling::Unrelated),
    ];
    prop::collection::vec(
        prop::collection::vec((spelling, "[a-z]{1,8}"), 0..4),
        0..6,
    )
}

fn to_sources(layers: &[Vec<(Spelling, String)>]) -> Vec<ConfigSource> {
    layers
        .iter()
        .enumerate()
        .map(|(i, entries)| {
            ConfigSource::inline(
                format!("layer-{i}"),
                entries.iter().map(|(s, v)| entry(*s, v)).collect(),
            )
        })
        .collect()
}

fn last_value(layers: &[Vec<(Spelling, String)>], wanted: fn(Spelling) -> bool) -> Option<String> {
    layers
        .iter()
        .flatten()
        .filter(|(s, _)| wanted(*s))
        .last()
        .map(|(_, v)| v.clone())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The current name wins whenever it is set; otherwise the deprecated one.
    #[test]
    fn current_name_beats_deprecated_name(layers in layers_strategy()) {
        let schema = schema();
        let config = DeprecationResolver::new(&schema).resolve(&to_sources(&layers));

        let current = last_value(&layers, |s| matches!(s, Spelling::Current));
        let deprecated = last_value(&layers, |s| matches!(s, Spelling::Deprecated));
        let expected = current.clone().or(deprecated);

        let resolved = config.get("database", "connection").unwrap();
        prop_assert_eq!(resolved.value().map(str::to_string), expected);
        prop_assert_eq!(resolved.is_deprecated_alias(), current.is_none() && resolved.is_from_layer());
    }

    // Plain options are last-layer-wins.
    #[test]
    fn last_layer_wins(layers in layers_strategy()) {
        let schema = schema();
        let config = DeprecationResolver::new(&schema).resolve(&to_sources(&layers));

        let expected = last_value(&layers, |s| matches!(s, Spelling::Unrelated));
        prop_assert_eq!(
            config.get_str("paste_deploy", "config_file").unwrap().map(str::to_string),
            expected
        );
    }

    // Resolving the same chain twice gives identical results.
    #[test]
    fn resolution_is_idempotent(layers in layers_strategy()) {
        let schema = schema();
        let sources = to_sources(&layers);
        let resolver = DeprecationResolver::new(&schema);
        prop_assert_eq!(resolver.resolve(&sources), resolver.resolve(&sources));
    }
}
