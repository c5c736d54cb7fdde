//! HTTP client helper with native-tls support.

use crate::error::CatalogError;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("font-catalog/", env!("CARGO_PKG_VERSION"));

/// Validate that a URL is usable as a remote endpoint.
///
/// Only HTTPS is accepted: the font-list request carries the API key.
pub fn validate_endpoint_url(url: &str) -> Result<url::Url, CatalogError> {
    let parsed =
        url::Url::parse(url).map_err(|e| CatalogError::InvalidUrl(format!("'{url}': {e}")))?;

    if parsed.scheme() != "https" {
        return Err(CatalogError::InvalidUrl(format!(
            "insecure scheme '{}' rejected for '{url}'; only https is allowed",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(CatalogError::InvalidUrl(format!("'{url}' has no host")));
    }

    Ok(parsed)
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// GET `url` with the given query parameters and return the body as text.
///
/// Query values are never logged. The body is capped at `limit` bytes.
///
/// # Errors
///
/// Transport failures, non-2xx statuses and oversized or unreadable bodies
/// all map to [`CatalogError::FetchFailure`].
pub fn get_text(
    agent: &Agent,
    url: &str,
    query: &[(&str, &str)],
    limit: u64,
) -> Result<String, CatalogError> {
    log::debug!("GET {url} ({} query parameter(s))", query.len());

    let mut request = agent.get(url).header("User-Agent", USER_AGENT);
    for (name, value) in query {
        request = request.query(*name, *value);
    }

    let mut body = request
        .call()
        .map_err(|e| CatalogError::FetchFailure(format!("request to {url} failed: {e}")))?
        .into_body();

    body.with_config()
        .limit(limit)
        .read_to_string()
        .map_err(|e| {
            CatalogError::FetchFailure(format!("failed to read response body from {url}: {e}"))
        })
}
