//! Making a resolved font usable for rendering.
//!
//! The catalog only decides whether activation is needed (built-ins never
//! need it). How a font is activated belongs to the collaborator behind
//! [`FontActivator`].

use crate::error::CatalogError;
use crate::font::FontEntry;
use crate::http;
use font_catalog_config::Config;
use std::time::Duration;
use ureq::Agent;

/// External step that makes a remote font usable.
pub trait FontActivator: Send + Sync {
    fn activate(&self, entry: &FontEntry) -> Result<(), CatalogError>;
}

impl<F> FontActivator for F
where
    F: Fn(&FontEntry) -> Result<(), CatalogError> + Send + Sync,
{
    fn activate(&self, entry: &FontEntry) -> Result<(), CatalogError> {
        self(entry)
    }
}

/// Activator that treats a font as usable once the provider serves a
/// stylesheet with at least one `@font-face` rule for it.
///
/// Collaborators that inject `<link rel="stylesheet">` tags themselves can
/// use [`StylesheetActivator::stylesheet_url`] directly.
pub struct StylesheetActivator {
    agent: Agent,
    base_url: url::Url,
    max_response_bytes: u64,
}

impl StylesheetActivator {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        max_response_bytes: u64,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            base_url: http::validate_endpoint_url(base_url)?,
            agent: http::agent(timeout),
            max_response_bytes,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Self::new(
            &config.stylesheet_url,
            config.request_timeout(),
            config.max_response_bytes,
        )
    }

    /// Stylesheet URL for a family, e.g. `.../css?family=Open+Sans`.
    pub fn stylesheet_url(&self, family: &str) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().clear().append_pair("family", family.trim());
        url.to_string()
    }
}

impl FontActivator for StylesheetActivator {
    fn activate(&self, entry: &FontEntry) -> Result<(), CatalogError> {
        let url = self.stylesheet_url(&entry.family);
        log::debug!("Activating '{}' via {url}", entry.family);

        let css = http::get_text(&self.agent, &url, &[], self.max_response_bytes)
            .map_err(|e| CatalogError::Activation(e.to_string()))?;

        if css.contains("@font-face") {
            Ok(())
        } else {
            Err(CatalogError::Activation(format!(
                "stylesheet for '{}' declares no font faces",
                entry.family
            )))
        }
    }
}
