//! Shared fixtures for font-catalog integration tests.
//!
//! Nothing here touches the network: `MockSource` stands in for the remote
//! font-list endpoint and counts how often it is called.

#![allow(dead_code)]

use font_catalog::{Catalog, CatalogError, Config, FontEntry, FontListSource};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const API_KEY: &str = "test-key";

/// Remote records used by most tests, deliberately unsorted.
pub fn remote_fonts() -> Vec<FontEntry> {
    vec![
        FontEntry::new("Roboto")
            .with_category("sans-serif")
            .with_variants(["regular", "700"])
            .with_file("regular", "https://fonts.gstatic.com/s/roboto/regular.ttf"),
        FontEntry::new("arial Black").with_category("sans-serif"),
        FontEntry::new("Open Sans").with_category("sans-serif"),
        FontEntry::new("Lato").with_category("sans-serif"),
        FontEntry::new("Roboto Mono").with_category("monospace"),
        FontEntry::new("Lora").with_category("serif"),
    ]
}

pub fn config() -> Config {
    Config::new()
        .with_api_key(API_KEY)
        .with_built_in_fonts(["Arial", "Courier New"])
}

struct MockInner {
    fonts: Vec<FontEntry>,
    calls: AtomicUsize,
    keys: Mutex<Vec<String>>,
    delay: Duration,
    failures_remaining: AtomicUsize,
    failure: CatalogError,
}

/// Counting stand-in for the remote endpoint. Clones share their counters.
#[derive(Clone)]
pub struct MockSource {
    inner: Arc<MockInner>,
}

impl MockSource {
    pub fn new(fonts: Vec<FontEntry>) -> Self {
        Self::build(fonts, Duration::ZERO, 0, CatalogError::FetchFailure(String::new()))
    }

    /// Sleep for `delay` inside every fetch.
    pub fn slow(fonts: Vec<FontEntry>, delay: Duration) -> Self {
        Self::build(fonts, delay, 0, CatalogError::FetchFailure(String::new()))
    }

    /// Fail the first `count` fetches with `failure`, then succeed.
    pub fn failing_first(
        fonts: Vec<FontEntry>,
        count: usize,
        failure: CatalogError,
        delay: Duration,
    ) -> Self {
        Self::build(fonts, delay, count, failure)
    }

    fn build(
        fonts: Vec<FontEntry>,
        delay: Duration,
        failures: usize,
        failure: CatalogError,
    ) -> Self {
        Self {
            inner: Arc::new(MockInner {
                fonts,
                calls: AtomicUsize::new(0),
                keys: Mutex::new(Vec::new()),
                delay,
                failures_remaining: AtomicUsize::new(failures),
                failure,
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// API keys passed to each fetch, in call order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.keys.lock().clone()
    }
}

impl FontListSource for MockSource {
    fn fetch(&self, api_key: &str) -> Result<Vec<FontEntry>, CatalogError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.keys.lock().push(api_key.to_string());

        if !self.inner.delay.is_zero() {
            std::thread::sleep(self.inner.delay);
        }

        let should_fail = self
            .inner
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(self.inner.failure.clone());
        }
        Ok(self.inner.fonts.clone())
    }
}

/// Catalog over `remote_fonts()` with built-ins Arial and Courier New.
pub fn catalog() -> (Catalog, MockSource) {
    let source = MockSource::new(remote_fonts());
    (Catalog::new(&config(), source.clone()), source)
}

pub fn families(entries: impl IntoIterator<Item = Arc<FontEntry>>) -> Vec<String> {
    entries.into_iter().map(|e| e.family.clone()).collect()
}
