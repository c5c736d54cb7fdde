//! The published, read-only font index.

use crate::font::FontEntry;
use font_catalog_collections::{PrefixCursor, Trie, TrieError};
use std::fmt;
use std::sync::Arc;

/// Prefix index over normalized family names.
///
/// Built once by the loader, then shared behind an `Arc` and never mutated.
#[derive(Default)]
pub struct FontIndex {
    trie: Trie<Arc<FontEntry>>,
}

impl FontIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry under an already-normalized key. The first entry for a key
    /// wins; see [`Trie::insert`].
    pub(crate) fn insert(&mut self, key: &str, entry: FontEntry) -> Result<(), TrieError> {
        self.trie.insert(key, Arc::new(entry))
    }

    /// Exact lookup by normalized key.
    pub fn get(&self, key: &str) -> Option<Arc<FontEntry>> {
        self.trie.get(key).cloned()
    }

    /// Entries whose normalized key starts with `prefix` (already normalized),
    /// in index insertion order.
    pub fn matches(self: &Arc<Self>, prefix: &str) -> FontMatches {
        FontMatches {
            cursor: self.trie.cursor(prefix),
            index: Arc::clone(self),
        }
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

impl fmt::Debug for FontIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontIndex")
            .field("len", &self.trie.len())
            .finish()
    }
}

/// Lazy sequence of entries matching a prefix.
///
/// Holds its own handle on the index, so it outlives the call that produced
/// it. Cloning yields an independent iterator from the same position, and
/// [`FontMatches::rewind`] restarts from the first match.
#[derive(Clone)]
pub struct FontMatches {
    index: Arc<FontIndex>,
    cursor: PrefixCursor,
}

impl FontMatches {
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }
}

impl Iterator for FontMatches {
    type Item = Arc<FontEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.index.trie.advance(&mut self.cursor).cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.index.trie.remaining(&self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FontMatches {}

impl fmt::Debug for FontMatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMatches")
            .field("remaining", &self.len())
            .finish()
    }
}
