//! In-memory font catalog.
//!
//! Fetches a remote font list at most once, merges it with a set of built-in
//! (web-safe) fonts, and indexes the result by normalized family name for
//! exact and prefix lookup.
//!
//! # Architecture
//!
//! - `font`: the `FontEntry` value type and name normalization
//! - `source`: the `FontListSource` seam and the Google Fonts implementation
//! - `single_flight`: `LoadGuard`, which runs a load at most once concurrently
//! - `loader`: seeds built-ins, fetches, merges through an AVL sorted list,
//!   and drains into the prefix index
//! - `index`: the published, read-only `FontIndex` and lazy `FontMatches`
//! - `catalog`: the `Catalog` facade collaborators call
//! - `activation`: the `FontActivator` seam for making remote fonts usable

pub mod activation;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod font;
pub mod http;
pub mod index;
pub mod loader;
pub mod logging;
pub mod single_flight;
pub mod source;

// Re-export main types for convenience
pub use activation::{FontActivator, StylesheetActivator};
pub use catalog::Catalog;
pub use error::CatalogError;
pub use font::{FontEntry, KIND_WEB_SAFE_FONT, KIND_WEBFONT, normalize_family};
pub use font_catalog_config::{Config, LogLevel};
pub use index::{FontIndex, FontMatches};
pub use loader::LoadReport;
pub use single_flight::{LoadGuard, LoadStatus};
pub use source::{FontListSource, GoogleFontsSource, parse_font_list};
