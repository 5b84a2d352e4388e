// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Entry loading.
//!
//! Builds a `TrieMap<String>` from a file of string entries. The format is
//! picked from the file extension:
//!
//! * `.json` - a flat object whose values are strings
//! * `.toml` - a table of strings; nested tables become dotted keys
//! * anything else - `key=value` / `key: value` lines
//!
//! [`LoaderConfig`] decides whether later entries replace earlier ones and
//! what happens to blank keys.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::config::LoaderConfig;
use crate::data_structures::lanai_trie::{parse_line, LanaiTrieError, TrieMap};
use crate::error::{LanaiError, LanaiResult};

/// Supported entry file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    /// Flat JSON object of strings
    Json,
    /// TOML document of strings and tables
    Toml,
    /// Properties-style lines
    Properties,
}

impl EntryFormat {
    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Properties,
        }
    }
}

/// Where an entry came from, for error reporting.
#[derive(Debug, Clone, Copy)]
enum EntryPosition {
    /// 1-based source line of a properties file
    Line(usize),
    /// 1-based position of an entry in a JSON or TOML document
    Item(usize),
}

/// JSON object members in document order, duplicates included.
struct JsonEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for JsonEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = JsonEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<JsonEntries, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(JsonEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Reads the entry file at `path` into a new trie.
///
/// # Returns
///
/// * `Ok(TrieMap<String>)` - The populated trie
/// * `Err(LanaiError)` - If the file cannot be read or decoded, or an entry is
///   rejected under `config`
pub fn load_entries<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> LanaiResult<TrieMap<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let format = EntryFormat::from_path(path);

    let map = parse_entries(&contents, format, config)?;
    tracing::info!(path = %path.display(), ?format, keys = map.len(), "entries loaded");
    Ok(map)
}

/// Decodes `contents` in `format` into a new trie.
pub fn parse_entries(
    contents: &str,
    format: EntryFormat,
    config: &LoaderConfig,
) -> LanaiResult<TrieMap<String>> {
    let map = TrieMap::new();

    match format {
        EntryFormat::Json => {
            let JsonEntries(entries) = serde_json::from_str(contents)?;
            for (index, (key, value)) in entries.into_iter().enumerate() {
                apply_entry(&map, &key, value, EntryPosition::Item(index + 1), config)?;
            }
        }
        EntryFormat::Toml => {
            let table: toml::Table = toml::from_str(contents)?;
            let mut entries = Vec::new();
            flatten_toml(&table, "", &mut entries)?;
            for (index, (key, value)) in entries.into_iter().enumerate() {
                apply_entry(&map, &key, value, EntryPosition::Item(index + 1), config)?;
            }
        }
        EntryFormat::Properties => {
            for (index, line) in contents.lines().enumerate() {
                if let Some((key, value)) = parse_line(line, index + 1)? {
                    let position = EntryPosition::Line(index + 1);
                    apply_entry(&map, key, value.to_owned(), position, config)?;
                }
            }
        }
    }

    Ok(map)
}

fn apply_entry(
    map: &TrieMap<String>,
    key: &str,
    value: String,
    position: EntryPosition,
    config: &LoaderConfig,
) -> LanaiResult<()> {
    if key.trim().is_empty() {
        if config.skip_empty_keys {
            tracing::debug!(?position, "skipping entry with blank key");
            return Ok(());
        }
        let content = format!("={value}");
        let err = match position {
            EntryPosition::Line(line) => LanaiTrieError::MalformedEntry { line, content },
            EntryPosition::Item(index) => LanaiTrieError::MalformedItem { index, content },
        };
        return Err(err.into());
    }

    if config.overwrite {
        map.put(key, value);
    } else {
        map.try_add(key, value)?;
    }
    Ok(())
}

fn flatten_toml(
    table: &toml::Table,
    prefix: &str,
    entries: &mut Vec<(String, String)>,
) -> LanaiResult<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::String(s) => entries.push((key, s.clone())),
            toml::Value::Table(nested) => flatten_toml(nested, &key, entries)?,
            other => {
                return Err(LanaiError::Custom(format!(
                    "Entry {key} must be a string, found {}",
                    other.type_str()
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn strict() -> LoaderConfig {
        LoaderConfig {
            overwrite: false,
            skip_empty_keys: false,
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(EntryFormat::from_path(&PathBuf::from("a.json")), EntryFormat::Json);
        assert_eq!(EntryFormat::from_path(&PathBuf::from("a.toml")), EntryFormat::Toml);
        assert_eq!(
            EntryFormat::from_path(&PathBuf::from("a.properties")),
            EntryFormat::Properties
        );
        assert_eq!(EntryFormat::from_path(&PathBuf::from("entries")), EntryFormat::Properties);
    }

    #[test]
    fn test_properties_overwrite() {
        let map = parse_entries(
            "a=1\na=2\n# note\nab=3\n",
            EntryFormat::Properties,
            &LoaderConfig::default(),
        )
        .unwrap();
        assert_eq!(map.get("a"), Some("2".to_string()));
        assert_eq!(map.keys(), vec!["a", "ab"]);
    }

    #[test]
    fn test_properties_duplicate_rejected_without_overwrite() {
        let err = parse_entries("a=1\na=2\n", EntryFormat::Properties, &strict()).unwrap_err();
        assert!(matches!(
            err,
            LanaiError::Trie(LanaiTrieError::KeyRejected { ref key }) if key == "a"
        ));
    }

    #[test]
    fn test_blank_key_handling() {
        let map = parse_entries("=x\nb=y\n", EntryFormat::Properties, &LoaderConfig::default())
            .unwrap();
        assert_eq!(map.keys(), vec!["b"]);

        let err = parse_entries("b=y\n = x\n", EntryFormat::Properties, &strict()).unwrap_err();
        assert!(matches!(
            err,
            LanaiError::Trie(LanaiTrieError::MalformedEntry { line: 2, .. })
        ));
    }

    #[test]
    fn test_json_entries() {
        let map = parse_entries(
            r#"{"de.tool": "Normal", "de.tool.test": "Debug"}"#,
            EntryFormat::Json,
            &LoaderConfig::default(),
        )
        .unwrap();
        assert_eq!(map.value_for_best_matching_key("de.tool.x"), Some("Normal".to_string()));

        let err = parse_entries(r#"{"a": 1}"#, EntryFormat::Json, &LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, LanaiError::Serialization(_)));
    }

    #[test]
    fn test_json_duplicate_keys() {
        let duplicated = r#"{"a": "1", "b": "x", "a": "2"}"#;

        let err = parse_entries(duplicated, EntryFormat::Json, &strict()).unwrap_err();
        assert!(matches!(
            err,
            LanaiError::Trie(LanaiTrieError::KeyRejected { ref key }) if key == "a"
        ));

        // With overwrite the later member wins, as for properties lines
        let map = parse_entries(duplicated, EntryFormat::Json, &LoaderConfig::default()).unwrap();
        assert_eq!(map.get("a"), Some("2".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_blank_key_in_documents_reports_entry_position() {
        let err = parse_entries(r#"{"a": "1", "": "x"}"#, EntryFormat::Json, &strict())
            .unwrap_err();
        assert!(matches!(
            err,
            LanaiError::Trie(LanaiTrieError::MalformedItem { index: 2, .. })
        ));
        assert_eq!(err.to_string(), "Trie error: Malformed entry #2: =x");
    }

    #[test]
    fn test_toml_nested_tables_become_dotted_keys() {
        let contents = "top = \"T\"\n[de.package]\ntool = \"Normal\"\n";
        let map = parse_entries(contents, EntryFormat::Toml, &LoaderConfig::default()).unwrap();
        assert_eq!(map.keys(), vec!["de.package.tool", "top"]);

        let err = parse_entries("n = 3\n", EntryFormat::Toml, &LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, LanaiError::Custom(_)));
    }

    #[test]
    fn test_load_entries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.properties");
        std::fs::write(&path, "/1/1=A\n/1/1/5=B\n").unwrap();

        let map = load_entries(&path, &LoaderConfig::default()).unwrap();
        assert_eq!(map.values_on_path("/1/1/5/6"), vec!["A", "B"]);

        let missing = load_entries(dir.path().join("nope"), &LoaderConfig::default());
        assert!(matches!(missing, Err(LanaiError::Io(_))));
    }
}
