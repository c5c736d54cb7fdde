//! Catalog loading: seed built-ins, fetch the remote list, merge, index.
//!
//! The load sequence runs under a [`LoadGuard`], so it executes at most once
//! concurrently and is never repeated after it succeeds.
//!
//! Duplicate policy: the merge set orders entries by normalized family with
//! built-ins ahead of remote entries on equal keys, and the index keeps the
//! first entry inserted for a key. A remote font that collides with a built-in
//! is therefore dropped; among colliding remote fonts the bytewise-smallest
//! family name wins.

use crate::error::CatalogError;
use crate::font::{FontEntry, MergeItem};
use crate::index::FontIndex;
use crate::single_flight::{LoadGuard, LoadStatus};
use crate::source::FontListSource;
use font_catalog_collections::{AvlSortedList, TrieError};
use parking_lot::{Mutex, RwLock};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counts from a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Built-in entries seeded
    pub built_in: usize,
    /// Records returned by the remote source
    pub remote: usize,
    /// Entries dropped because their normalized family was already indexed
    pub skipped_duplicates: usize,
    /// Remote records dropped for having a blank family
    pub skipped_invalid: usize,
    /// Entries in the published index
    pub indexed: usize,
    pub elapsed: Duration,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fonts indexed ({} built-in, {} remote, {} duplicate(s) and {} invalid skipped) in {:.2?}",
            self.indexed,
            self.built_in,
            self.remote,
            self.skipped_duplicates,
            self.skipped_invalid,
            self.elapsed
        )
    }
}

/// Owns everything needed to build the font index, and builds it at most once.
pub struct CatalogLoader {
    built_ins: Vec<String>,
    source: Box<dyn FontListSource>,
    api_key: RwLock<Option<String>>,
    guard: LoadGuard<FontIndex>,
    last_report: Mutex<Option<LoadReport>>,
}

impl CatalogLoader {
    pub fn new(
        built_ins: Vec<String>,
        api_key: Option<String>,
        source: Box<dyn FontListSource>,
    ) -> Self {
        Self {
            built_ins,
            source,
            api_key: RwLock::new(api_key),
            guard: LoadGuard::new(),
            last_report: Mutex::new(None),
        }
    }

    /// Replace the credential used by the next load attempt.
    ///
    /// Once the index is loaded it is never rebuilt, so a new key only has an
    /// effect before the first successful load.
    pub fn set_api_key(&self, api_key: Option<String>) {
        let mut current = self.api_key.write();
        if self.guard.status() == LoadStatus::Loaded && *current != api_key {
            log::warn!("API key changed after the font catalog was loaded; keeping loaded catalog");
        }
        *current = api_key;
    }

    pub fn has_api_key(&self) -> bool {
        self.current_api_key().is_some()
    }

    /// Return the index, loading it first if necessary.
    ///
    /// # Errors
    ///
    /// Returns the outcome of the load attempt this call ran or joined:
    /// [`CatalogError::MissingCredential`], [`CatalogError::FetchFailure`] or
    /// [`CatalogError::MalformedResponse`].
    pub fn ensure_loaded(&self) -> Result<Arc<FontIndex>, CatalogError> {
        self.guard.get_or_load(|| self.load())
    }

    /// The index if it has been loaded. Never triggers a load.
    pub fn index(&self) -> Option<Arc<FontIndex>> {
        self.guard.get()
    }

    pub fn status(&self) -> LoadStatus {
        self.guard.status()
    }

    pub fn last_error(&self) -> Option<CatalogError> {
        self.guard.last_error()
    }

    /// Counts from the successful load, once there is one.
    pub fn last_report(&self) -> Option<LoadReport> {
        self.last_report.lock().clone()
    }

    fn current_api_key(&self) -> Option<String> {
        self.api_key
            .read()
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    fn load(&self) -> Result<FontIndex, CatalogError> {
        let started = Instant::now();
        log::info!("Loading font catalog");

        let mut report = LoadReport::default();
        let mut merge = AvlSortedList::new(MergeItem::catalog_order);

        for name in &self.built_ins {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            merge.add(MergeItem::new(FontEntry::built_in(name)));
            report.built_in += 1;
        }

        let Some(api_key) = self.current_api_key() else {
            log::error!("Font catalog load requested without an API key");
            return Err(CatalogError::MissingCredential);
        };

        let remote = self.source.fetch(&api_key).inspect_err(|e| {
            log::error!("Font catalog load failed: {e}");
        })?;
        report.remote = remote.len();

        for entry in remote {
            if entry.family.trim().is_empty() {
                log::warn!("Skipping remote font record with a blank family name");
                report.skipped_invalid += 1;
                continue;
            }
            merge.add(MergeItem::new(entry));
        }

        let index = drain_into_index(merge, &mut report);
        report.elapsed = started.elapsed();
        log::info!("Font catalog loaded: {report}");
        *self.last_report.lock() = Some(report);

        Ok(index)
    }
}

impl fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("built_ins", &self.built_ins.len())
            .field("has_api_key", &self.has_api_key())
            .field("status", &self.status())
            .finish()
    }
}

/// Insert merge-set items into a fresh index in ascending order.
fn drain_into_index<F>(merge: AvlSortedList<MergeItem, F>, report: &mut LoadReport) -> FontIndex
where
    F: Fn(&MergeItem, &MergeItem) -> Ordering,
{
    let mut index = FontIndex::new();
    for MergeItem { key, entry } in merge {
        match index.insert(&key, entry) {
            Ok(()) => report.indexed += 1,
            Err(TrieError::DuplicateKey(key)) => {
                log::debug!("Skipping duplicate font family '{key}'");
                report.skipped_duplicates += 1;
            }
            Err(TrieError::EmptyKey) => report.skipped_invalid += 1,
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_with(remote: Vec<FontEntry>) -> CatalogLoader {
        let source = move |_: &str| -> Result<Vec<FontEntry>, CatalogError> { Ok(remote.clone()) };
        CatalogLoader::new(
            vec!["Arial".to_string(), "Courier New".to_string()],
            Some("key".to_string()),
            Box::new(source),
        )
    }

    #[test]
    fn test_built_in_wins_over_remote_duplicate() {
        let loader = loader_with(vec![
            FontEntry::new("ARIAL").with_category("sans-serif"),
            FontEntry::new("Roboto"),
        ]);
        let index = loader.ensure_loaded().unwrap();

        let arial = index.get("arial").unwrap();
        assert!(arial.is_built_in());
        assert_eq!(arial.family, "Arial");

        let report = loader.last_report().unwrap();
        assert_eq!(report.built_in, 2);
        assert_eq!(report.remote, 2);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(report.indexed, 3);
    }

    #[test]
    fn test_remote_duplicates_resolve_by_family_bytes() {
        let loader = loader_with(vec![FontEntry::new("roboto"), FontEntry::new("Roboto")]);
        let index = loader.ensure_loaded().unwrap();
        // "Roboto" < "roboto" bytewise
        assert_eq!(index.get("roboto").unwrap().family, "Roboto");
    }

    #[test]
    fn test_blank_remote_family_is_skipped() {
        let loader = loader_with(vec![FontEntry::new("  "), FontEntry::new("Lato")]);
        let index = loader.ensure_loaded().unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(loader.last_report().unwrap().skipped_invalid, 1);
    }

    #[test]
    fn test_blank_api_key_is_missing_credential() {
        let loader = loader_with(Vec::new());
        loader.set_api_key(Some("   ".to_string()));
        assert!(!loader.has_api_key());
        assert_eq!(
            loader.ensure_loaded().unwrap_err(),
            CatalogError::MissingCredential
        );
        assert_eq!(loader.status(), LoadStatus::Failed);
        assert!(loader.last_report().is_none());
    }

    #[test]
    fn test_report_display() {
        let report = LoadReport {
            built_in: 2,
            remote: 3,
            skipped_duplicates: 1,
            skipped_invalid: 0,
            indexed: 4,
            elapsed: Duration::from_millis(5),
        };
        let text = report.to_string();
        assert!(text.starts_with("4 fonts indexed (2 built-in, 3 remote"));
    }
}
