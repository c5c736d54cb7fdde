//! The catalog facade used by external collaborators.
//!
//! Every lookup implicitly ensures the index is loaded, normalizes its input,
//! and then reads the shared, immutable index.
//!
//! ```rust,no_run
//! use font_catalog::{Catalog, Config};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let catalog = Catalog::from_config(&config)?;
//!
//!     if let Some(font) = catalog.resolve_by_name(" roboto ")? {
//!         println!("{} ({})", font.family, font.category);
//!     }
//!     for font in catalog.search_by_prefix("ar")? {
//!         println!("{}", font.family);
//!     }
//!     Ok(())
//! }
//! ```

use crate::activation::FontActivator;
use crate::error::CatalogError;
use crate::font::{FontEntry, normalize_family};
use crate::index::FontMatches;
use crate::loader::{CatalogLoader, LoadReport};
use crate::single_flight::LoadStatus;
use crate::source::{FontListSource, GoogleFontsSource};
use font_catalog_config::Config;
use std::sync::Arc;

/// In-memory font catalog.
///
/// Construct one at the composition root and share it (`&Catalog` or
/// `Arc<Catalog>`); it is `Send + Sync` and safe to call from many threads
/// at once. The remote list is fetched at most once per successful load.
#[derive(Debug)]
pub struct Catalog {
    loader: CatalogLoader,
}

impl Catalog {
    /// Create a catalog over an arbitrary remote source.
    ///
    /// Uses the built-in font list and API key from `config`.
    pub fn new(config: &Config, source: impl FontListSource + 'static) -> Self {
        Self {
            loader: CatalogLoader::new(
                config.built_in_fonts.clone(),
                config.api_key().map(str::to_string),
                Box::new(source),
            ),
        }
    }

    /// Create a catalog backed by the Google Fonts Developer API.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if the configured endpoint is not
    /// an https URL.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Ok(Self::new(config, GoogleFontsSource::from_config(config)?))
    }

    /// Set the credential for the remote endpoint.
    ///
    /// Takes effect on the next load attempt; a catalog that is already loaded
    /// keeps its index.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.loader.set_api_key(Some(api_key.into()));
    }

    /// Load the catalog if it is not loaded yet.
    ///
    /// Concurrent callers share a single attempt. After a failure the next
    /// call starts a fresh attempt.
    pub fn ensure_loaded(&self) -> Result<(), CatalogError> {
        self.loader.ensure_loaded().map(|_| ())
    }

    /// Current load state. Never triggers a load.
    pub fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    /// Number of indexed fonts, or `None` before the first successful load.
    pub fn loaded_len(&self) -> Option<usize> {
        self.loader.index().map(|index| index.len())
    }

    /// Counts from the successful load, once there is one.
    pub fn load_report(&self) -> Option<LoadReport> {
        self.loader.last_report()
    }

    /// Error of the most recent failed load attempt.
    pub fn last_error(&self) -> Option<CatalogError> {
        self.loader.last_error()
    }

    /// Find a font by family name, ignoring case and surrounding whitespace.
    ///
    /// Returns `Ok(None)` when no font matches.
    pub fn resolve_by_name(&self, name: &str) -> Result<Option<Arc<FontEntry>>, CatalogError> {
        let index = self.loader.ensure_loaded()?;
        Ok(index.get(&normalize_family(name)))
    }

    /// All fonts whose normalized family starts with the normalized `prefix`,
    /// alphabetically. The empty prefix yields the whole catalog.
    pub fn search_by_prefix(&self, prefix: &str) -> Result<FontMatches, CatalogError> {
        let index = self.loader.ensure_loaded()?;
        Ok(index.matches(&normalize_family(prefix)))
    }

    /// Whether the named font can be used for rendering.
    ///
    /// Unknown fonts are unavailable. Built-ins are always available and are
    /// never handed to the activator. Remote fonts are available when
    /// `activator` succeeds; an activation error yields `false`.
    pub fn is_available(
        &self,
        name: &str,
        activator: &dyn FontActivator,
    ) -> Result<bool, CatalogError> {
        let Some(entry) = self.resolve_by_name(name)? else {
            log::debug!("Font '{}' is not in the catalog", name.trim());
            return Ok(false);
        };

        if entry.is_built_in() {
            return Ok(true);
        }

        match activator.activate(&entry) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("Could not activate font '{}': {e}", entry.family);
                Ok(false)
            }
        }
    }
}
