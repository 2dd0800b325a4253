//! Image processing utilities for three-color e-paper output.
//!
//! Provides resizing (letterbox fit or crop-to-fill at 640x384),
//! Floyd-Steinberg dithering against a black/white/red palette,
//! and flattening into the pixel pairs the display protocol encodes.

pub mod dither;
pub mod pairs;
pub mod palette;
pub mod resize;

use std::path::Path;

use image::{DynamicImage, RgbImage};
use tracing::{debug, info};

// Re-exports for convenience
pub use dither::{floyd_steinberg_dither, nearest_color_convert, quantize};
pub use pairs::{PixelPair, pixel_pairs};
pub use palette::PaletteColor;
pub use resize::{ResizeMode, crop_to_fill, fit_to_canvas, prepare_canvas};

/// Display width in pixels.
pub const DISPLAY_WIDTH: u32 = 640;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: u32 = 384;

/// Errors that can occur while preparing an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pixel ({x}, {y}) has non-palette color {rgb:?}")]
    UnmappedColor { x: u32, y: u32, rgb: [u8; 3] },

    #[error("Image has an odd pixel count ({0}), cannot form pixel pairs")]
    OddPixelCount(usize),
}

/// Result type alias for image-processor operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Options controlling how a source image becomes a display canvas.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Letterbox the whole image or crop it to fill the display.
    pub mode: ResizeMode,

    /// Apply Floyd-Steinberg dithering. When disabled each pixel is mapped
    /// straight to its nearest palette color.
    pub dither: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            mode: ResizeMode::Crop,
            dither: true,
        }
    }
}

impl PrepareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set resize mode.
    pub fn with_mode(mut self, mode: ResizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set dither flag.
    pub fn with_dither(mut self, val: bool) -> Self {
        self.dither = val;
        self
    }
}

/// Decode an image file from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Decoded source image"
    );
    Ok(img)
}

/// Resize and quantize an image to a 640x384 three-color canvas.
pub fn prepare_image(img: &DynamicImage, options: &PrepareOptions) -> RgbImage {
    let rgb = img.to_rgb8();
    let canvas = prepare_canvas(&rgb, DISPLAY_WIDTH, DISPLAY_HEIGHT, options.mode);
    debug!(mode = ?options.mode, dither = options.dither, "Canvas ready, quantizing");
    quantize(&canvas, options.dither)
}
