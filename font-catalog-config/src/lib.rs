//! Configuration system for the font-catalog service.
//!
//! This crate provides configuration loading and default values for the
//! catalog. It includes:
//!
//! - The remote font-list endpoint and the API credential used against it
//! - HTTP limits (timeout, response size cap)
//! - The built-in (web-safe) font seed list
//! - `${VAR}` environment variable substitution with an allowlist
//! - Log level selection for the binary

pub mod config;
pub mod defaults;
pub mod env_vars;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{API_KEY_ENV_VAR, Config};
pub use defaults::WEB_SAFE_FONT_NAMES;
pub use env_vars::{substitute_variables, substitute_variables_with_allowlist};
pub use error::ConfigError;
pub use types::LogLevel;
