//! Typed errors for catalog loading and lookups.
//!
//! `CatalogError` is `Clone` because a single failed load attempt is reported
//! to every caller that joined it.

use font_catalog_config::API_KEY_ENV_VAR;
use thiserror::Error;

/// Errors surfaced by the catalog and its collaborators.
///
/// "Not found" is never an error: lookups return `None` or an empty iterator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A load was requested before any API key was configured.
    #[error(
        "no API key configured for the remote font list; set `api_key` in the config \
         or the {env} environment variable",
        env = API_KEY_ENV_VAR
    )]
    MissingCredential,

    /// The remote endpoint could not be reached or answered with an error status.
    #[error("failed to fetch the remote font list: {0}")]
    FetchFailure(String),

    /// The endpoint answered, but the body was not a font list.
    #[error("unexpected font list response: {0}")]
    MalformedResponse(String),

    /// A configured endpoint URL was rejected.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An external activation step failed for a resolved font.
    #[error("font activation failed: {0}")]
    Activation(String),
}

impl CatalogError {
    /// Whether this error came out of a load attempt (as opposed to a
    /// configuration or activation problem).
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingCredential
                | CatalogError::FetchFailure(_)
                | CatalogError::MalformedResponse(_)
        )
    }
}
