//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

use crate::types::LogLevel;

/// Font families every browser and desktop ships with.
///
/// These are seeded into the catalog as built-in entries and never require a
/// network fetch or an activation step.
pub const WEB_SAFE_FONT_NAMES: &[&str] = &[
    "Arial",
    "Arial Black",
    "Book Antiqua",
    "Comic Sans MS",
    "Courier",
    "Courier New",
    "Garamond",
    "Georgia",
    "Helvetica",
    "Impact",
    "Lucida Console",
    "Lucida Sans Unicode",
    "Monaco",
    "Palatino Linotype",
    "Tahoma",
    "Times",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

pub fn api_url() -> String {
    "https://www.googleapis.com/webfonts/v1/webfonts".to_string()
}

pub fn stylesheet_url() -> String {
    "https://fonts.googleapis.com/css".to_string()
}

pub fn request_timeout_secs() -> u64 {
    30
}

pub fn max_response_bytes() -> u64 {
    10 * 1024 * 1024 // The full Google Fonts list is roughly 1 MB
}

pub fn built_in_fonts() -> Vec<String> {
    WEB_SAFE_FONT_NAMES.iter().map(|s| s.to_string()).collect()
}

pub fn log_level() -> LogLevel {
    LogLevel::Warn
}
