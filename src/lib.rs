// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Trie Library
//!
//! A thread-safe, character-indexed prefix tree mapping string keys to
//! values, with completion, sub-map and longest-prefix queries. The library
//! also carries the pieces the `lanai` binary is built from: layered
//! configuration, an entry file loader and crate-wide error types.
//!
//! # Example
//!
//! ```
//! use lanai_trie_lib::TrieMap;
//!
//! let map = TrieMap::<i32>::new();
//! map.add("/1/1", 1);
//! map.add("/1/1/5", 3);
//!
//! assert_eq!(map.values_on_path("/1/1/5/6"), vec![1, 3]);
//! assert_eq!(map.best_matching_path("/1/9"), Some("/1/".to_string()));
//! ```

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod loader;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{KeyLookup, TrieMap, TrieNode, TrieProperties};

/// Version information for Lanai Trie.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

