// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! String properties backed by a [`TrieMap`].
//!
//! `TrieProperties` is a thin façade: every operation delegates to the
//! underlying map. The only behaviour it adds is a chain of default
//! properties consulted by [`TrieProperties::property`].

use std::collections::BTreeSet;
use std::io::BufRead;

use super::error::{LanaiTrieError, LanaiTrieResult};
use super::TrieMap;

/// Key/value string properties stored in a trie, with optional defaults.
#[derive(Debug, Clone, Default)]
pub struct TrieProperties {
    /// Own entries
    map: TrieMap<String>,

    /// Fallback consulted by `property` when a key has no own value
    defaults: Option<Box<TrieProperties>>,
}

impl TrieProperties {
    /// Creates empty properties without defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty properties that fall back to `defaults`.
    pub fn with_defaults(defaults: TrieProperties) -> Self {
        Self {
            map: TrieMap::new(),
            defaults: Some(Box::new(defaults)),
        }
    }

    /// Wraps an existing map.
    pub fn from_map(map: TrieMap<String>) -> Self {
        Self {
            map,
            defaults: None,
        }
    }

    /// Returns the underlying map, dropping any defaults.
    pub fn into_inner(self) -> TrieMap<String> {
        self.map
    }

    /// The underlying map.
    pub fn as_map(&self) -> &TrieMap<String> {
        &self.map
    }

    /// Own value for `key`, ignoring defaults.
    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key)
    }

    /// Value for `key`, falling back to the defaults chain.
    pub fn property(&self, key: &str) -> Option<String> {
        self.map.get(key).or_else(|| {
            self.defaults
                .as_ref()
                .and_then(|defaults| defaults.property(key))
        })
    }

    /// Like [`TrieProperties::property`] with a final fallback value.
    pub fn property_or(&self, key: &str, fallback: &str) -> String {
        self.property(key).unwrap_or_else(|| fallback.to_owned())
    }

    /// Sets `key` and returns the value it replaced.
    pub fn set_property(&self, key: &str, value: impl Into<String>) -> Option<String> {
        self.map.put(key, value.into())
    }

    /// Removes an own property.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    /// Removes all own properties. Defaults are untouched.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no own entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Structural check, true for any stored prefix as well as full keys.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_prefix(key)
    }

    /// Whether any own property holds `value`.
    pub fn contains_value(&self, value: &str) -> bool {
        self.map.contains_value(&value.to_owned())
    }

    /// Sorted names of own properties and of the defaults chain.
    pub fn property_names(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self.map.keys().into_iter().collect();
        if let Some(defaults) = &self.defaults {
            names.extend(defaults.property_names());
        }
        names
    }

    /// Own values in key order, followed by the defaults' values.
    pub fn values(&self) -> Vec<String> {
        let mut values = self.map.values();
        if let Some(defaults) = &self.defaults {
            values.extend(defaults.values());
        }
        values
    }

    /// Reads `key=value` or `key: value` lines into these properties.
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. Keys and
    /// values are trimmed. Later lines overwrite earlier ones.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of properties set.
    /// * `Err(LanaiTrieError)` - If reading fails or a line has no separator.
    pub fn load<R: BufRead>(&self, reader: R) -> LanaiTrieResult<usize> {
        let mut count = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some((key, value)) = parse_line(&line, index + 1)? else {
                continue;
            };
            self.set_property(key, value);
            count += 1;
        }
        tracing::debug!(count, "properties loaded");
        Ok(count)
    }
}

impl TrieMap<String> {
    /// Turns this map into properties without defaults.
    pub fn into_properties(self) -> TrieProperties {
        TrieProperties::from_map(self)
    }
}

/// Splits one properties line. `Ok(None)` means the line carries no entry.
pub(crate) fn parse_line(line: &str, line_number: usize) -> LanaiTrieResult<Option<(&str, &str)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
        return Ok(None);
    }

    match trimmed.find(['=', ':']) {
        Some(at) => Ok(Some((trimmed[..at].trim(), trimmed[at + 1..].trim()))),
        None => Err(LanaiTrieError::MalformedEntry {
            line: line_number,
            content: trimmed.to_owned(),
        }),
    }
}
