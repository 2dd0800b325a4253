//! End-to-end run: acquire, prepare, encode, upload.

use std::path::Path;

use anyhow::Context;
use epd_client::{DisplayClient, UploadPlan};
use image_processor::{PrepareOptions, load_image, pixel_pairs, prepare_image};
use tracing::info;

use super::fetch;
use crate::config::AppConfig;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: usize,
    pub chunks: usize,
    /// False for dry runs.
    pub sent: bool,
}

/// Run the whole pipeline for `config`.
pub async fn run(config: &AppConfig) -> Result<RunSummary, anyhow::Error> {
    let path = fetch::resolve_source(&config.source)
        .await
        .context("failed to fetch image")?;
    send_image(config, &path).await
}

/// Prepare the image at `path` and upload it, or stop after encoding on a
/// dry run.
pub async fn send_image(config: &AppConfig, path: &Path) -> Result<RunSummary, anyhow::Error> {
    let client = DisplayClient::new(&config.host)?;

    let img = load_image(path).with_context(|| format!("failed to load image {}", path.display()))?;
    let options = PrepareOptions::new()
        .with_mode(config.mode)
        .with_dither(config.dither);
    let prepared = prepare_image(&img, &options);

    if let Some(preview) = &config.preview {
        prepared
            .save(preview)
            .with_context(|| format!("failed to write preview {}", preview.display()))?;
        info!(path = %preview.display(), "Wrote preview image");
    }

    let pairs = pixel_pairs(&prepared)?;
    let plan = UploadPlan::from_pairs(&pairs);
    let mut summary = RunSummary {
        pairs: pairs.len(),
        chunks: plan.chunks().len(),
        sent: false,
    };

    if config.dry_run {
        info!(
            pairs = summary.pairs,
            chunks = summary.chunks,
            "Dry run: skipping upload"
        );
        return Ok(summary);
    }

    client
        .upload(&plan)
        .await
        .with_context(|| format!("failed to send image to {}", config.host))?;
    summary.sent = true;
    Ok(summary)
}
