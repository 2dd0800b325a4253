//! Resizing an arbitrary image onto the fixed display canvas.
//!
//! Both modes preserve aspect ratio and use Lanczos3 filtering. `Fit`
//! keeps the whole image and pads with white, `Crop` scales to cover
//! the canvas and trims the overflow evenly from both sides.

use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

use crate::palette::PaletteColor;

/// How a source image is mapped onto the display canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Letterbox: scale to fit inside the canvas, pad with white.
    Fit,
    /// Scale to cover the canvas, center-crop the excess.
    #[default]
    Crop,
}

/// Map `img` onto a `width`x`height` canvas using `mode`.
pub fn prepare_canvas(img: &RgbImage, width: u32, height: u32, mode: ResizeMode) -> RgbImage {
    match mode {
        ResizeMode::Fit => fit_to_canvas(img, width, height),
        ResizeMode::Crop => crop_to_fill(img, width, height),
    }
}

/// Scale `img` to fit inside `width`x`height` and center it on a white canvas.
pub fn fit_to_canvas(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (orig_w, orig_h) = img.dimensions();
    if (orig_w, orig_h) == (width, height) {
        debug!(width, height, "Image already at target size, skipping resize");
        return img.clone();
    }

    let ratio = (f64::from(width) / f64::from(orig_w)).min(f64::from(height) / f64::from(orig_h));
    let new_w = scaled(orig_w, ratio).min(width);
    let new_h = scaled(orig_h, ratio).min(height);

    debug!(orig_w, orig_h, new_w, new_h, width, height, "Letterboxing image");

    let resized = imageops::resize(img, new_w, new_h, FilterType::Lanczos3);
    let mut canvas = RgbImage::from_pixel(width, height, PaletteColor::White.rgb());
    let x = (width - new_w) / 2;
    let y = (height - new_h) / 2;
    imageops::replace(&mut canvas, &resized, i64::from(x), i64::from(y));
    canvas
}

/// Scale `img` to cover `width`x`height` and crop the center.
///
/// The source is cropped to the target aspect ratio first, so extreme
/// aspect ratios never allocate an oversized intermediate.
pub fn crop_to_fill(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (orig_w, orig_h) = img.dimensions();
    if (orig_w, orig_h) == (width, height) {
        debug!(width, height, "Image already at target size, skipping resize");
        return img.clone();
    }

    let target_aspect = f64::from(width) / f64::from(height);
    let source_aspect = f64::from(orig_w) / f64::from(orig_h);
    let (crop_w, crop_h) = if source_aspect > target_aspect {
        (scaled(orig_h, target_aspect).min(orig_w), orig_h)
    } else {
        (orig_w, scaled(orig_w, 1.0 / target_aspect).min(orig_h))
    };
    let x = (orig_w - crop_w) / 2;
    let y = (orig_h - crop_h) / 2;

    debug!(orig_w, orig_h, crop_w, crop_h, width, height, "Cropping image to fill");

    let cropped = imageops::crop_imm(img, x, y, crop_w, crop_h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

fn scaled(len: u32, ratio: f64) -> u32 {
    ((f64::from(len) * ratio).round() as u32).max(1)
}
