//! Ordered collections backing the font catalog index.
//!
//! This crate provides:
//! - `AvlSortedList`: a self-balancing sorted container keyed by a caller-supplied
//!   comparator, used to produce a deterministic ordering before indexing
//! - `Trie`: a prefix tree supporting exact lookup and prefix enumeration in
//!   insertion order
//!
//! Neither type knows anything about fonts; the catalog crate decides the
//! comparator and the key normalization.

pub mod sorted_list;
pub mod trie;

// Re-export main types for convenience
pub use sorted_list::AvlSortedList;
pub use trie::{PrefixCursor, PrefixIter, Trie, TrieError};
