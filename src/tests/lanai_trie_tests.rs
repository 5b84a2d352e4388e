// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tests for the Lanai Trie.
//!
//! Property-based tests compare the trie against a `BTreeMap` model, and
//! table tests pin down query results on a fixed key set.

use super::test_utils::{entries_strategy, key_strategy, map_from, unicode_key_strategy};
use crate::data_structures::{KeyLookup, TrieMap};
use proptest::prelude::*;
use std::collections::BTreeMap;
use test_case::test_case;

/// Reference model: the first write for a key wins.
fn model_from(entries: &[(String, u32)]) -> BTreeMap<String, u32> {
    let mut model = BTreeMap::new();
    for (key, value) in entries {
        model.entry(key.clone()).or_insert(*value);
    }
    model
}

/// Model keys that are prefixes of `query`, shortest first.
fn model_prefixes_of<'a>(
    model: &'a BTreeMap<String, u32>,
    query: &'a str,
) -> impl Iterator<Item = (&'a String, &'a u32)> + 'a {
    let mut hits: Vec<_> = model.iter().filter(|(key, _)| query.starts_with(key.as_str())).collect();
    hits.sort_by_key(|(key, _)| key.len());
    hits.into_iter()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_add_keeps_first_value(entries in entries_strategy()) {
        let map = map_from(&entries);
        let model = model_from(&entries);

        prop_assert_eq!(map.len(), model.len());
        for (key, value) in &model {
            prop_assert!(map.contains_key(key));
            prop_assert_eq!(map.get(key), Some(*value));
            prop_assert_eq!(map.lookup(key), KeyLookup::Key(Some(*value)));
        }
    }

    #[test]
    fn prop_force_add_keeps_last_value(entries in entries_strategy()) {
        let map = TrieMap::new();
        let mut model = BTreeMap::new();
        for (key, value) in &entries {
            prop_assert!(map.force_add(key, *value));
            model.insert(key.clone(), *value);
        }

        prop_assert_eq!(map.entries(), model.iter().map(|(k, v)| (k.clone(), Some(*v))).collect::<Vec<_>>());
    }

    #[test]
    fn prop_completions_are_sorted_and_complete(
        entries in entries_strategy(),
        prefix in "[abc/.]{0,3}",
    ) {
        let map = map_from(&entries);
        let model = model_from(&entries);

        let expected: Vec<String> = model
            .keys()
            .filter(|key| key.starts_with(prefix.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(map.completions(&prefix), expected);

        let expected_values: Vec<u32> = model
            .iter()
            .filter(|(key, _)| key.starts_with(prefix.as_str()))
            .map(|(_, value)| *value)
            .collect();
        prop_assert_eq!(map.sub_values(&prefix), expected_values);
    }

    #[test]
    fn prop_best_matching_path_is_longest_present_prefix(
        entries in entries_strategy(),
        query in "[abc/.]{0,8}",
    ) {
        let map = map_from(&entries);

        match map.best_matching_path(&query) {
            Some(path) => {
                prop_assert!(query.starts_with(path.as_str()));
                prop_assert!(map.contains_prefix(&path));
                if let Some(next) = query[path.len()..].chars().next() {
                    let extended = format!("{path}{next}");
                    prop_assert!(!map.contains_prefix(&extended));
                }
            }
            None => {
                let first = query.chars().next();
                prop_assert!(!first.is_some_and(|c| map.contains_prefix(c.to_string())));
            }
        }
    }

    #[test]
    fn prop_best_matching_key_and_path_values(
        entries in entries_strategy(),
        query in "[abc/.]{0,8}",
    ) {
        let map = map_from(&entries);
        let model = model_from(&entries);

        let on_path: Vec<u32> = model_prefixes_of(&model, &query).map(|(_, v)| *v).collect();
        prop_assert_eq!(map.values_on_path(&query), on_path.clone());
        prop_assert_eq!(map.value_for_best_matching_key(&query), on_path.last().copied());
    }

    #[test]
    fn prop_remove_is_idempotent(entries in entries_strategy(), key in key_strategy()) {
        let map = map_from(&entries);
        let model = model_from(&entries);
        let existed = map.contains_prefix(&key);

        prop_assert_eq!(map.remove(&key), model.get(&key).copied());
        prop_assert_eq!(map.remove(&key), None);
        prop_assert!(!map.contains_key(&key));
        prop_assert_eq!(map.contains_prefix(&key), existed);
        prop_assert_eq!(map.len(), model.len() - usize::from(model.contains_key(&key)));
    }

    #[test]
    fn prop_sub_map_matches_filtered_entries(
        entries in entries_strategy(),
        prefix in "[abc/.]{0,3}",
    ) {
        let map = map_from(&entries);
        let sub_map = map.sub_map(&prefix);

        let expected: Vec<_> = map
            .entries()
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix.as_str()))
            .collect();
        prop_assert_eq!(sub_map.entries(), expected);
    }

    #[test]
    fn prop_unicode_keys(keys in proptest::collection::vec(unicode_key_strategy(8), 0..20)) {
        let map = TrieMap::new();
        for (index, key) in keys.iter().enumerate() {
            map.put(key, index);
        }

        for key in keys.iter().filter(|key| !key.is_empty()) {
            prop_assert!(map.contains_key(key));
            prop_assert_eq!(map.best_matching_path(key), Some(key.clone()));
        }
        let clone = map.clone();
        prop_assert_eq!(&clone, &map);
    }
}

fn package_map() -> TrieMap<&'static str> {
    let map = TrieMap::new();
    map.add("de.package.tool", "Normal");
    map.add("de.package.tool.test", "Debug");
    map.add("de.package.other", "Warn");
    map
}

#[test_case("de.package.tool", Some("Normal") ; "exact key")]
#[test_case("de.package.tool.test.Unit", Some("Debug") ; "below nested key")]
#[test_case("de.package.tool.xyz", Some("Normal") ; "sibling of nested key")]
#[test_case("de.package.too", None ; "inside a key")]
#[test_case("de.package.other.x", Some("Warn") ; "other branch")]
#[test_case("org.tool", None ; "unknown root")]
#[test_case("", None ; "empty query")]
fn test_value_for_best_matching_key(query: &str, expected: Option<&str>) {
    assert_eq!(package_map().value_for_best_matching_key(query), expected);
}

#[test_case("de.package.toolbox", Some("de.package.tool") ; "stops after mismatch")]
#[test_case("de.package.x", Some("de.package.") ; "scaffolding path")]
#[test_case("d", Some("d") ; "single char")]
#[test_case("x", None ; "nothing matches")]
fn test_best_matching_path(query: &str, expected: Option<&str>) {
    assert_eq!(package_map().best_matching_path(query).as_deref(), expected);
}

#[test_case("de.package.tool", KeyLookup::Key(Some("Normal")) ; "stored key")]
#[test_case("de.package", KeyLookup::Prefix ; "structural prefix")]
#[test_case("de.packages", KeyLookup::Missing ; "missing path")]
fn test_lookup(key: &str, expected: KeyLookup<&'static str>) {
    assert_eq!(package_map().lookup(key), expected);
}
