// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lanai Trie Implementation
//!
//! This module provides a character-indexed prefix tree that maps string keys
//! to values and answers prefix questions a hash map cannot: which keys start
//! with a prefix, how much of a query is present in the tree, and which stored
//! key is the longest prefix of a query.
//!
//! # Example
//!
//! ```
//! use lanai_trie_lib::data_structures::lanai_trie::TrieMap;
//!
//! let map = TrieMap::<String>::new();
//! map.add("de.package.tool", "Normal".to_string());
//! map.add("de.package.tool.test", "Debug".to_string());
//!
//! assert_eq!(
//!     map.value_for_best_matching_key("de.package.tool.xyz"),
//!     Some("Normal".to_string())
//! );
//! assert_eq!(
//!     map.completions("de.package"),
//!     vec!["de.package.tool", "de.package.tool.test"]
//! );
//! ```
//!
//! # Boundaries and scaffolding
//!
//! Inserting `"abc"` creates nodes for `a`, `ab` and `abc`, but only `abc`
//! becomes a boundary. The intermediate nodes are scaffolding: they make
//! `contains_prefix("ab")` true while `contains_key("ab")` stays false.
//! Removing a key clears its boundary and value but keeps the nodes.
//!
//! # Concurrency
//!
//! Each map owns one `parking_lot::RwLock` around its whole tree. Every public
//! operation takes that lock once, so a multi-character insert or walk is
//! atomic with respect to other threads.

mod error;
mod node;
mod properties;

use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

pub use error::{LanaiTrieError, LanaiTrieResult};
pub use node::TrieNode;
pub use properties::TrieProperties;

pub(crate) use properties::parse_line;

/// Outcome of a strict key lookup.
///
/// Keeps apart the three cases that [`TrieMap::get`] folds into `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup<V> {
    /// No node exists for the key
    Missing,
    /// A node exists, but no inserted key ends there
    Prefix,
    /// The key was inserted; the value may be absent
    Key(Option<V>),
}

/// Lanai Trie is a prefix tree mapping string keys to values.
///
/// Key features:
/// * Lexicographically ordered enumeration of keys and values
/// * Completion, sub-map and best-match queries
/// * No-clobber insertion with an explicit force mode
/// * Thread-safe through a single tree-wide reader/writer lock
pub struct TrieMap<V> {
    /// The root node of the trie
    root: RwLock<TrieNode<V>>,
}

impl<V> TrieMap<V> {
    /// Creates a new empty `TrieMap`.
    pub fn new() -> Self {
        Self {
            root: RwLock::new(TrieNode::root()),
        }
    }

    /// Replaces the tree with a fresh empty root.
    pub fn clear(&self) {
        *self.root.write() = TrieNode::root();
        tracing::debug!("trie cleared");
    }

    /// Returns `true` if the root has no children.
    ///
    /// This is a structural check: a tree whose keys were all removed but
    /// whose scaffolding nodes remain is not empty.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_leaf()
    }

    /// Returns the number of keys in the trie.
    ///
    /// This walks the entire tree, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        count_keys(&self.root.read())
    }

    /// Checks whether a node exists for `prefix`.
    ///
    /// The empty prefix resolves to the root and always returns `true`.
    pub fn contains_prefix<P>(&self, prefix: P) -> bool
    where
        P: AsRef<str>,
    {
        find_node(&self.root.read(), prefix.as_ref()).is_some()
    }

    /// Checks whether `key` was inserted as a complete key.
    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        find_node(&self.root.read(), key.as_ref()).is_some_and(TrieNode::is_boundary)
    }

    /// Removes the value stored for `key` and clears its boundary.
    ///
    /// The nodes on the path are kept, so `contains_prefix(key)` stays true.
    ///
    /// # Returns
    ///
    /// The previous value, or `None` if the path does not exist or held no value.
    pub fn remove<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        let mut root = self.root.write();
        let node = find_node_mut(&mut root, key.as_ref())?;
        let previous = node.clear_value();
        node.set_boundary(false);
        previous
    }

    /// Returns every key below `prefix`, the prefix itself included when it
    /// is a key, in lexicographic order.
    ///
    /// Returns an empty vector when no node exists for `prefix`.
    pub fn completions<P>(&self, prefix: P) -> Vec<String>
    where
        P: AsRef<str>,
    {
        let mut completions = Vec::new();
        self.for_each_below(prefix.as_ref(), |path, node| {
            if node.is_boundary() {
                completions.push(path.to_owned());
            }
        });
        completions
    }

    /// Returns all keys in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        self.completions("")
    }

    /// Returns the longest prefix of `prefix` that exists in the tree.
    ///
    /// The result is not necessarily a complete key. Returns `None` for an
    /// empty query or when not even its first character is present.
    pub fn best_matching_path<P>(&self, prefix: P) -> Option<String>
    where
        P: AsRef<str>,
    {
        let root = self.root.read();
        let mut node = &*root;
        let mut matched = String::new();

        for c in prefix.as_ref().chars() {
            match node.child_at(c) {
                Some(child) => {
                    matched.push(c);
                    node = child;
                }
                None => break,
            }
        }

        (!matched.is_empty()).then_some(matched)
    }

    /// Runs `visit` on the node for `prefix` and every node below it,
    /// depth-first in ascending character order, under one read lock.
    fn for_each_below<F>(&self, prefix: &str, mut visit: F)
    where
        F: FnMut(&str, &TrieNode<V>),
    {
        let root = self.root.read();
        if let Some(node) = find_node(&root, prefix) {
            let mut path = prefix.to_owned();
            visit_subtree(node, &mut path, &mut visit);
        }
    }
}

impl<V: Clone> TrieMap<V> {
    /// Adds `key` with an optional value without overwriting.
    ///
    /// Missing nodes on the path are created as scaffolding. Existing nodes
    /// on the way keep their state; only the final node is written.
    ///
    /// # Returns
    ///
    /// * `true` - If the key was written, or the key is empty.
    /// * `false` - If the final node exists and could not be written: it is
    ///   already a boundary, or no value was given.
    pub fn add<K, O>(&self, key: K, value: O) -> bool
    where
        K: AsRef<str>,
        O: Into<Option<V>>,
    {
        let key = key.as_ref();
        let added = insert_at(&mut self.root.write(), key, value.into(), false);
        if !added {
            tracing::trace!(key, "write rejected, key already present");
        }
        added
    }

    /// Adds `key` with `value`, overwriting whatever was stored before.
    ///
    /// Always returns `true`.
    pub fn force_add<K>(&self, key: K, value: V) -> bool
    where
        K: AsRef<str>,
    {
        insert_at(&mut self.root.write(), key.as_ref(), Some(value), true)
    }

    /// Like [`TrieMap::add`] but reports a rejected write as an error.
    pub fn try_add<K, O>(&self, key: K, value: O) -> LanaiTrieResult<()>
    where
        K: AsRef<str>,
        O: Into<Option<V>>,
    {
        let key = key.as_ref();
        if self.add(key, value) {
            Ok(())
        } else {
            Err(LanaiTrieError::KeyRejected {
                key: key.to_owned(),
            })
        }
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// The previous value is read and the new one written under the same lock.
    pub fn put<K>(&self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let mut root = self.root.write();
        let previous = find_node(&root, key).and_then(|node| node.value().cloned());
        insert_at(&mut root, key, Some(value), true);
        previous
    }

    /// Stores every pair with [`TrieMap::put`] semantics.
    pub fn put_all<I, K>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut count = 0usize;
        for (key, value) in entries {
            self.force_add(key, value);
            count += 1;
        }
        tracing::debug!(count, "bulk insert finished");
    }

    /// Returns the value stored at the node for `key`.
    ///
    /// This follows the structural path only. A scaffolding node and a missing
    /// path both give `None`; use [`TrieMap::lookup`] to tell them apart.
    pub fn get<K>(&self, key: K) -> Option<V>
    where
        K: AsRef<str>,
    {
        find_node(&self.root.read(), key.as_ref()).and_then(|node| node.value().cloned())
    }

    /// Classifies `key` as missing, a structural prefix, or a complete key.
    pub fn lookup<K>(&self, key: K) -> KeyLookup<V>
    where
        K: AsRef<str>,
    {
        match find_node(&self.root.read(), key.as_ref()) {
            None => KeyLookup::Missing,
            Some(node) if node.is_boundary() => KeyLookup::Key(node.value().cloned()),
            Some(_) => KeyLookup::Prefix,
        }
    }

    /// Returns the values stored at or below `prefix` in key order.
    ///
    /// An empty prefix covers the whole tree.
    pub fn sub_values<P>(&self, prefix: P) -> Vec<V>
    where
        P: AsRef<str>,
    {
        let mut values = Vec::new();
        self.for_each_below(prefix.as_ref(), |_, node| {
            if let Some(value) = stored_value(node) {
                values.push(value.clone());
            }
        });
        values
    }

    /// Returns all stored values in key order.
    pub fn values(&self) -> Vec<V> {
        self.sub_values("")
    }

    /// Copies every value-bearing key at or below `prefix` into a new map.
    ///
    /// Keys keep their full form; the prefix is not stripped.
    pub fn sub_map<P>(&self, prefix: P) -> TrieMap<V>
    where
        P: AsRef<str>,
    {
        let sub_map = TrieMap::new();
        self.for_each_below(prefix.as_ref(), |path, node| {
            if let Some(value) = stored_value(node) {
                sub_map.put(path, value.clone());
            }
        });
        tracing::debug!(prefix = prefix.as_ref(), "sub map extracted");
        sub_map
    }

    /// Returns every key with its value, in lexicographic order.
    ///
    /// Keys added without a value are paired with `None`.
    pub fn entries(&self) -> Vec<(String, Option<V>)> {
        let mut entries = Vec::new();
        self.for_each_below("", |path, node| {
            if node.is_boundary() {
                entries.push((path.to_owned(), node.value().cloned()));
            }
        });
        entries
    }

    /// Returns the value of the longest stored key that is a prefix of `prefix`.
    ///
    /// Walks the query until a character is missing, remembering the last
    /// value seen. Returns `None` for an empty query.
    pub fn value_for_best_matching_key<P>(&self, prefix: P) -> Option<V>
    where
        P: AsRef<str>,
    {
        let root = self.root.read();
        let mut node = &*root;
        let mut best = None;

        for c in prefix.as_ref().chars() {
            let Some(child) = node.child_at(c) else {
                break;
            };
            if let Some(value) = stored_value(child) {
                best = Some(value);
            }
            node = child;
        }

        best.cloned()
    }

    /// Returns the values of all stored keys lying on the path of `prefix`,
    /// from the root downwards.
    ///
    /// The walk stops at the first missing character; the node reached last
    /// still contributes its value. An empty query gives an empty vector.
    pub fn values_on_path<P>(&self, prefix: P) -> Vec<V>
    where
        P: AsRef<str>,
    {
        let root = self.root.read();
        let mut node = &*root;
        let mut chars = prefix.as_ref().chars();
        let mut values = Vec::new();

        loop {
            if let Some(value) = stored_value(node) {
                values.push(value.clone());
            }
            let Some(c) = chars.next() else {
                break;
            };
            let Some(child) = node.child_at(c) else {
                break;
            };
            node = child;
        }

        values
    }
}

impl<V: Clone + PartialEq> TrieMap<V> {
    /// Returns the first key, in key order, whose stored value equals `value`.
    pub fn path_for_value(&self, value: &V) -> Option<String> {
        let root = self.root.read();
        find_path_for_value(&root, &mut String::new(), value)
    }

    /// Checks whether any key holds `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.path_for_value(value).is_some()
    }
}

impl<V> Default for TrieMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TrieMap<V> {
    fn clone(&self) -> Self {
        Self {
            root: RwLock::new(self.root.read().clone()),
        }
    }
}

impl<V: PartialEq> PartialEq for TrieMap<V> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        // Lock in address order so two concurrent comparisons cannot deadlock.
        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };
        let first = first.root.read();
        let second = second.root.read();
        *first == *second
    }
}

impl<V: Eq> Eq for TrieMap<V> {}

impl<V: Hash> Hash for TrieMap<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.read().hash(state);
    }
}

impl<V: fmt::Debug> fmt::Debug for TrieMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieMap")
            .field("root", &*self.root.read())
            .finish()
    }
}

/// Formats as `{key : value;\n...}` over every value-bearing key.
impl<V: fmt::Display> fmt::Display for TrieMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_stored(&self.root.read(), &mut String::new(), f)?;
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for TrieMap<V>
where
    K: AsRef<str>,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = TrieMap::new();
        map.put_all(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for TrieMap<V>
where
    K: AsRef<str>,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

/// Walks or creates the path for `key` and writes the final node.
fn insert_at<V>(root: &mut TrieNode<V>, key: &str, value: Option<V>, force: bool) -> bool {
    let mut chars = key.chars();
    let Some(last) = chars.next_back() else {
        return true;
    };

    let mut node = root;
    for c in chars {
        node.upsert_child(c, None, force, false);
        let Some(child) = node.child_at_mut(c) else {
            return false;
        };
        node = child;
    }

    node.upsert_child(last, value, force, true)
}

fn find_node<'a, V>(root: &'a TrieNode<V>, key: &str) -> Option<&'a TrieNode<V>> {
    key.chars().try_fold(root, |node, c| node.child_at(c))
}

fn find_node_mut<'a, V>(root: &'a mut TrieNode<V>, key: &str) -> Option<&'a mut TrieNode<V>> {
    key.chars().try_fold(root, |node, c| node.child_at_mut(c))
}

fn stored_value<V>(node: &TrieNode<V>) -> Option<&V> {
    node.value().filter(|_| node.is_boundary())
}

fn visit_subtree<V, F>(node: &TrieNode<V>, path: &mut String, visit: &mut F)
where
    F: FnMut(&str, &TrieNode<V>),
{
    visit(path, node);
    for child in node.children() {
        path.push(child.character());
        visit_subtree(child, path, visit);
        path.pop();
    }
}

fn count_keys<V>(node: &TrieNode<V>) -> usize {
    let own = usize::from(node.is_boundary());
    own + node.children().map(count_keys).sum::<usize>()
}

fn find_path_for_value<V: PartialEq>(
    node: &TrieNode<V>,
    path: &mut String,
    value: &V,
) -> Option<String> {
    if stored_value(node) == Some(value) {
        return Some(path.clone());
    }
    for child in node.children() {
        path.push(child.character());
        let found = find_path_for_value(child, path, value);
        path.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

fn write_stored<V: fmt::Display>(
    node: &TrieNode<V>,
    path: &mut String,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if let Some(value) = stored_value(node) {
        writeln!(f, "{path} : {value};")?;
    }
    for child in node.children() {
        path.push(child.character());
        write_stored(child, path, f)?;
        path.pop();
    }
    Ok(())
}
