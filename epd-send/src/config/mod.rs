//! Configuration: CLI arguments with environment overrides, plus validation.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;

use std::path::PathBuf;

/// Where the source image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Classify a raw CLI argument: `http://` and `https://` are URLs,
    /// anything else is a local path.
    pub fn parse(raw: &str) -> Self {
        if validation::is_http_url(raw) {
            ImageSource::Url(raw.to_string())
        } else {
            ImageSource::Path(PathBuf::from(raw))
        }
    }
}
