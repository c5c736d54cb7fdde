//! Remote font-list sources.
//!
//! The loader only depends on [`FontListSource`]; [`GoogleFontsSource`] is the
//! production implementation backed by the Google Fonts Developer API.

use crate::error::CatalogError;
use crate::font::FontEntry;
use crate::http;
use font_catalog_config::Config;
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

/// Something that can produce the remote font list for a credential.
///
/// Called at most once per load attempt. Implementations block until the list
/// is available or the attempt has failed.
pub trait FontListSource: Send + Sync {
    fn fetch(&self, api_key: &str) -> Result<Vec<FontEntry>, CatalogError>;
}

impl<F> FontListSource for F
where
    F: Fn(&str) -> Result<Vec<FontEntry>, CatalogError> + Send + Sync,
{
    fn fetch(&self, api_key: &str) -> Result<Vec<FontEntry>, CatalogError> {
        self(api_key)
    }
}

/// Wire shape of the font-list response.
#[derive(Debug, Deserialize)]
struct FontListResponse {
    items: Option<Vec<FontEntry>>,
}

/// Parse a font-list response body.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedResponse`] when the body is not JSON, has
/// no `items` list, or holds records that are not font records.
pub fn parse_font_list(body: &str) -> Result<Vec<FontEntry>, CatalogError> {
    let response: FontListResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::MalformedResponse(format!("invalid font list JSON: {e}")))?;

    response.items.ok_or_else(|| {
        CatalogError::MalformedResponse("response has no `items` list".to_string())
    })
}

/// Fetches the font list from the Google Fonts Developer API.
pub struct GoogleFontsSource {
    agent: Agent,
    api_url: String,
    max_response_bytes: u64,
}

impl GoogleFontsSource {
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if `api_url` is not an https URL.
    pub fn new(
        api_url: &str,
        timeout: Duration,
        max_response_bytes: u64,
    ) -> Result<Self, CatalogError> {
        http::validate_endpoint_url(api_url)?;
        Ok(Self {
            agent: http::agent(timeout),
            api_url: api_url.to_string(),
            max_response_bytes,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_url,
            config.request_timeout(),
            config.max_response_bytes,
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl FontListSource for GoogleFontsSource {
    fn fetch(&self, api_key: &str) -> Result<Vec<FontEntry>, CatalogError> {
        log::info!("Fetching remote font list from {}", self.api_url);
        let body = http::get_text(
            &self.agent,
            &self.api_url,
            &[("key", api_key)],
            self.max_response_bytes,
        )?;
        let fonts = parse_font_list(&body)?;
        log::info!("Remote font list returned {} families", fonts.len());
        Ok(fonts)
    }
}
