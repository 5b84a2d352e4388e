// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Data structures for Lanai Trie.
//!
//! The prefix tree and the string-properties façade built on it.

pub mod lanai_trie;

// Re-export common data structures
pub use lanai_trie::{
    KeyLookup, LanaiTrieError, LanaiTrieResult, TrieMap, TrieNode, TrieProperties,
};
