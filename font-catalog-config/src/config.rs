//! The `Config` struct, file loading, and validation.
//!
//! Configuration lives in `~/.config/font-catalog/config.yaml` (XDG convention;
//! the platform config directory on Windows). A missing file yields defaults.
//! The raw YAML goes through `${VAR}` substitution before parsing, so the API
//! key can be kept out of the file:
//!
//! ```yaml
//! api_key: ${GOOGLE_FONTS_API_KEY}
//! request_timeout_secs: 10
//! ```

use crate::defaults;
use crate::env_vars::substitute_variables;
use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV_VAR: &str = "FONT_CATALOG_API_KEY";

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Credential for the remote font-list endpoint.
    ///
    /// A value that is empty, whitespace, or an unresolved `${VAR}` placeholder
    /// counts as absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Remote font-list endpoint; the key is appended as `?key=...`
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Base URL of the stylesheet service used to activate remote fonts
    #[serde(default = "defaults::stylesheet_url")]
    pub stylesheet_url: String,

    /// Global timeout for a single HTTP request
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum accepted response body size in bytes
    #[serde(default = "defaults::max_response_bytes")]
    pub max_response_bytes: u64,

    /// Families seeded into the catalog without any network access
    #[serde(default = "defaults::built_in_fonts")]
    pub built_in_fonts: Vec<String>,

    #[serde(default = "defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: defaults::api_url(),
            stylesheet_url: defaults::stylesheet_url(),
            request_timeout_secs: defaults::request_timeout_secs(),
            max_response_bytes: defaults::max_response_bytes(),
            built_in_fonts: defaults::built_in_fonts(),
            log_level: defaults::log_level(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    ///
    /// `FONT_CATALOG_API_KEY` overrides the file's `api_key`.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            log::info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let contents = substitute_variables(contents);
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR)
            && !key.trim().is_empty()
        {
            log::debug!("Using API key from {API_KEY_ENV_VAR}");
            self.api_key = Some(key);
        }
    }

    /// Check field values for semantic errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_response_bytes must be greater than zero".to_string(),
            ));
        }
        Self::validate_https_url("api_url", &self.api_url)?;
        Self::validate_https_url("stylesheet_url", &self.stylesheet_url)?;

        if let Some(position) = self
            .built_in_fonts
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "built_in_fonts[{position}] is empty"
            )));
        }
        Ok(())
    }

    fn validate_https_url(field: &str, value: &str) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(value)
            .map_err(|e| ConfigError::Validation(format!("{field} '{value}' is invalid: {e}")))?;
        if parsed.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "{field} must use https, got '{}'",
                parsed.scheme()
            )));
        }
        Ok(())
    }

    /// The usable API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("font-catalog")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("font-catalog")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Replace the built-in font list
    pub fn with_built_in_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.built_in_fonts = fonts.into_iter().map(Into::into).collect();
        self
    }
}
