// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Lanai Trie.
//!
//! This module provides the `TrieNode` structure used by [`super::TrieMap`].
//! A node stands for one character position below the root. It never knows
//! the path that leads to it; traversals rebuild paths as they descend.
//!
//! Nodes carry no lock of their own. Every method here runs while the owning
//! map holds a guard on its single tree-wide lock.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Character used by the root node. It is never part of a key.
pub(crate) const ROOT_SENTINEL: char = ' ';

/// A node in the Lanai Trie.
///
/// Each node represents a character in a key path. Boundary nodes mark the
/// end of a complete key and may hold the value stored for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrieNode<V> {
    /// The character this node represents
    character: char,

    /// Value stored for the key ending here
    value: Option<V>,

    /// Whether some inserted key terminates exactly at this node
    boundary: bool,

    /// Child nodes, ordered by character
    children: BTreeMap<char, TrieNode<V>>,
}

impl<V> TrieNode<V> {
    /// Creates a node for `character`.
    ///
    /// A value is only kept when the node is a boundary.
    pub(crate) fn new(character: char, value: Option<V>, boundary: bool) -> Self {
        debug_assert!(boundary || value.is_none(), "non-boundary node cannot hold a value");
        Self {
            character,
            value: if boundary { value } else { None },
            boundary,
            children: BTreeMap::new(),
        }
    }

    /// Creates an empty root node.
    pub(crate) fn root() -> Self {
        Self::new(ROOT_SENTINEL, None, false)
    }

    /// The character this node represents.
    pub fn character(&self) -> char {
        self.character
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Whether a key ends at this node.
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Returns the child for `c` without descending further.
    pub fn child_at(&self, c: char) -> Option<&TrieNode<V>> {
        self.children.get(&c)
    }

    pub(crate) fn child_at_mut(&mut self, c: char) -> Option<&mut TrieNode<V>> {
        self.children.get_mut(&c)
    }

    /// Returns the children in ascending character order.
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<V>> {
        self.children.values()
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Creates or updates the child at `c`.
    ///
    /// A missing child is always created and `true` is returned. An existing
    /// child is only overwritten when `value` is provided and either `force`
    /// is set or the child is not a boundary yet; in that case its value is
    /// replaced and its boundary flag becomes `make_boundary`. Otherwise
    /// nothing changes and `false` is returned.
    pub(crate) fn upsert_child(
        &mut self,
        c: char,
        value: Option<V>,
        force: bool,
        make_boundary: bool,
    ) -> bool {
        match self.children.entry(c) {
            Entry::Vacant(entry) => {
                entry.insert(TrieNode::new(c, value, make_boundary));
                true
            }
            Entry::Occupied(mut entry) => {
                let child = entry.get_mut();
                match value {
                    Some(value) if force || !child.boundary => {
                        child.value = Some(value);
                        child.boundary = make_boundary;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Detaches the stored value. The boundary flag is left as it is.
    pub(crate) fn clear_value(&mut self) -> Option<V> {
        self.value.take()
    }

    pub(crate) fn set_boundary(&mut self, boundary: bool) {
        self.boundary = boundary;
    }

    /// True when the node is a boundary and holds a value.
    pub fn has_stored_value(&self) -> bool {
        self.boundary && self.value.is_some()
    }
}
