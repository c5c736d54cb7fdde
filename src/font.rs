//! The catalog's value type and name normalization.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `kind` (and `category`) of entries that ship with every platform and need
/// neither a network fetch nor an activation step.
pub const KIND_WEB_SAFE_FONT: &str = "Web Safe Font";

/// `kind` reported by the Google Fonts Developer API for its records.
pub const KIND_WEBFONT: &str = "webfonts#webfont";

/// Normalize a family name for use as an index key: surrounding whitespace
/// trimmed, lowercased.
pub fn normalize_family(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single font family as listed by the provider.
///
/// Field names follow the provider's JSON (`lastModified` is camelCase on the
/// wire). Everything except `family` defaults to empty when missing; unknown
/// fields are ignored. Entries are shared behind `Arc` once indexed and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontEntry {
    /// Display name with its original casing
    pub family: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
    #[serde(default)]
    pub version: String,
    /// Opaque provider timestamp
    #[serde(default)]
    pub last_modified: String,
    /// Variant label to font file URL
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub kind: String,
}

impl FontEntry {
    /// A remote-style entry with only a family name set.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            variants: Vec::new(),
            subsets: Vec::new(),
            version: String::new(),
            last_modified: String::new(),
            files: BTreeMap::new(),
            category: String::new(),
            kind: KIND_WEBFONT.to_string(),
        }
    }

    /// A built-in (web-safe) entry.
    pub fn built_in(family: impl Into<String>) -> Self {
        Self {
            category: KIND_WEB_SAFE_FONT.to_string(),
            kind: KIND_WEB_SAFE_FONT.to_string(),
            ..Self::new(family)
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file(mut self, variant: impl Into<String>, url: impl Into<String>) -> Self {
        self.files.insert(variant.into(), url.into());
        self
    }

    /// True for built-in entries, which are usable without activation.
    pub fn is_built_in(&self) -> bool {
        self.kind == KIND_WEB_SAFE_FONT
    }

    /// Index key for this entry.
    pub fn normalized_family(&self) -> String {
        normalize_family(&self.family)
    }
}

/// An entry paired with its precomputed index key, as held in the merge set.
#[derive(Debug, Clone)]
pub(crate) struct MergeItem {
    pub key: String,
    pub entry: FontEntry,
}

impl MergeItem {
    pub fn new(entry: FontEntry) -> Self {
        Self {
            key: entry.normalized_family(),
            entry,
        }
    }

    /// Catalog order: normalized family, then built-ins ahead of remote
    /// entries with the same key, then the raw family bytes.
    ///
    /// Draining in this order makes trie insertion order equal to
    /// alphabetical key order, and lets a built-in claim its key before any
    /// remote duplicate.
    pub fn catalog_order(a: &MergeItem, b: &MergeItem) -> Ordering {
        a.key
            .cmp(&b.key)
            .then_with(|| b.entry.is_built_in().cmp(&a.entry.is_built_in()))
            .then_with(|| a.entry.family.cmp(&b.entry.family))
    }
}
