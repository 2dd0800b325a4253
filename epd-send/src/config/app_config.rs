//! Runtime configuration built from CLI arguments + environment overrides.

use std::path::PathBuf;

use image_processor::ResizeMode;

use super::ImageSource;
use super::validation::{validate_host, validate_setting};
use crate::cli::Cli;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub source: ImageSource,
    pub mode: ResizeMode,
    pub dither: bool,
    pub preview: Option<PathBuf>,
    pub dry_run: bool,
}

impl AppConfig {
    /// Build config from parsed arguments and the process environment.
    pub fn load(cli: &Cli) -> Result<Self, anyhow::Error> {
        Self::from_sources(cli, |key| std::env::var(key).ok())
    }

    /// Build config from parsed arguments and an environment lookup.
    ///
    /// Flags given on the command line always win. When a flag is absent,
    /// `EPD_FIT`, `EPD_DITHER`, `EPD_DRY_RUN` and `EPD_PREVIEW` supply the value.
    pub fn from_sources(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<Option<String>, anyhow::Error> {
            match env(key) {
                Some(v) if !v.is_empty() => {
                    validate_setting(key, &v)
                        .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
                    Ok(Some(v))
                }
                _ => Ok(None),
            }
        };

        validate_host(&cli.ip).map_err(|e| anyhow::anyhow!("invalid display address '{}': {e}", cli.ip))?;

        let fit = cli.fit || g("EPD_FIT")?.is_some_and(|v| v == "true");
        let dither = if cli.no_dither {
            false
        } else {
            g("EPD_DITHER")?.is_none_or(|v| v == "true")
        };
        let dry_run = cli.dry_run || g("EPD_DRY_RUN")?.is_some_and(|v| v == "true");
        let preview = match &cli.preview {
            Some(path) => Some(path.clone()),
            None => g("EPD_PREVIEW")?.map(PathBuf::from),
        };

        let source = ImageSource::parse(&cli.image);
        if let ImageSource::Path(path) = &source {
            anyhow::ensure!(!path.as_os_str().is_empty(), "image path is empty");
        }

        let config = Self {
            host: cli.ip.clone(),
            source,
            mode: if fit { ResizeMode::Fit } else { ResizeMode::Crop },
            dither,
            preview,
            dry_run,
        };
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
