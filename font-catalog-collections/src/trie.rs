//! Prefix tree with insertion-ordered enumeration.
//!
//! Nodes live in a flat arena and refer to each other by index. Every node
//! records the ids of all values stored at or below it, in the order those
//! values were inserted. Locating a prefix costs `O(prefix length)`; walking
//! its matches afterwards costs `O(1)` per match, and the walk yields values
//! in insertion order rather than in character order.
//!
//! Duplicate keys are rejected: the first value inserted under a key wins.

use std::collections::BTreeMap;

use thiserror::Error;

const ROOT: usize = 0;

/// Errors returned by [`Trie::insert`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The empty string cannot be stored as a key.
    #[error("trie keys must not be empty")]
    EmptyKey,

    /// A value is already stored under this key; the existing value is kept.
    #[error("key '{0}' is already present in the trie")]
    DuplicateKey(String),
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: BTreeMap<char, usize>,
    /// Id of the value whose key ends here
    value: Option<usize>,
    /// Ids of every value at or below this node, in insertion order
    subtree: Vec<usize>,
}

/// Prefix tree mapping string keys to values.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    nodes: Vec<Node>,
    values: Vec<T>,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            values: Vec::new(),
        }
    }

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::EmptyKey`] for `""` and [`TrieError::DuplicateKey`]
    /// when `key` is already present. The trie is unchanged on error.
    pub fn insert(&mut self, key: &str, value: T) -> Result<(), TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        if self.contains_key(key) {
            return Err(TrieError::DuplicateKey(key.to_string()));
        }

        let id = self.values.len();
        let mut current = ROOT;
        self.nodes[ROOT].subtree.push(id);

        for ch in key.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(ch, next);
                    next
                }
            };
            self.nodes[current].subtree.push(id);
        }

        self.nodes[current].value = Some(id);
        self.values.push(value);
        Ok(())
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&T> {
        let node = self.find(key)?;
        self.nodes[node].value.map(|id| &self.values[id])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values whose key starts with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.find(prefix)
            .map_or(0, |node| self.nodes[node].subtree.len())
    }

    /// Iterate every value whose key starts with `prefix`, in insertion order.
    ///
    /// The empty prefix matches every value.
    pub fn prefix_iter(&self, prefix: &str) -> PrefixIter<'_, T> {
        PrefixIter {
            trie: self,
            cursor: self.cursor(prefix),
        }
    }

    /// Iterate every value in insertion order.
    pub fn iter(&self) -> PrefixIter<'_, T> {
        self.prefix_iter("")
    }

    /// Create a detached cursor over the values matching `prefix`.
    ///
    /// A cursor holds no borrow, so it can be stored next to an owning handle
    /// of the trie (an `Arc`, for instance) and advanced with [`Trie::advance`].
    /// It is only meaningful for the trie that created it.
    pub fn cursor(&self, prefix: &str) -> PrefixCursor {
        PrefixCursor {
            node: self.find(prefix),
            position: 0,
        }
    }

    /// Yield the next value for `cursor`, or `None` once it is exhausted.
    pub fn advance(&self, cursor: &mut PrefixCursor) -> Option<&T> {
        let node = self.nodes.get(cursor.node?)?;
        let id = *node.subtree.get(cursor.position)?;
        cursor.position += 1;
        self.values.get(id)
    }

    /// Values not yet yielded by `cursor`.
    pub fn remaining(&self, cursor: &PrefixCursor) -> usize {
        cursor
            .node
            .and_then(|node| self.nodes.get(node))
            .map_or(0, |node| node.subtree.len().saturating_sub(cursor.position))
    }

    fn find(&self, key: &str) -> Option<usize> {
        let mut current = ROOT;
        for ch in key.chars() {
            current = *self.nodes[current].children.get(&ch)?;
        }
        Some(current)
    }
}

/// Position within the matches of a prefix. See [`Trie::cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixCursor {
    node: Option<usize>,
    position: usize,
}

impl PrefixCursor {
    /// Start again from the first match.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

/// Borrowing iterator over the values matching a prefix.
#[derive(Debug, Clone)]
pub struct PrefixIter<'a, T> {
    trie: &'a Trie<T>,
    cursor: PrefixCursor,
}

impl<'a, T> Iterator for PrefixIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.trie.advance(&mut self.cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trie.remaining(&self.cursor);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PrefixIter<'_, T> {}
