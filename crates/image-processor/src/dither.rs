//! Quantizing RGB images down to the black/white/red palette.
//!
//! Provides Floyd-Steinberg error-diffusion dithering and plain
//! nearest-color conversion.

use image::RgbImage;
use tracing::debug;

use crate::palette::PaletteColor;

/// Quantize `img` to the palette, dithered or not.
pub fn quantize(img: &RgbImage, dither: bool) -> RgbImage {
    if dither {
        floyd_steinberg_dither(img)
    } else {
        nearest_color_convert(img)
    }
}

/// Apply Floyd-Steinberg dithering against the three-color palette.
///
/// Error is diffused independently per channel:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
///
/// Accumulated values are clamped to 0..=255 before the palette lookup.
pub fn floyd_steinberg_dither(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying Floyd-Steinberg dithering");

    // i32 buffer so diffused error can overshoot the u8 range
    let mut buffer: Vec<Vec<[i32; 3]>> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| img.get_pixel(x, y).0.map(i32::from))
                .collect()
        })
        .collect();

    let mut output = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let old_pixel = buffer[y as usize][x as usize].map(|c| c.clamp(0, 255));
            let new_color = PaletteColor::nearest(old_pixel);
            let new_pixel = new_color.rgb().0.map(i32::from);
            let error = [
                old_pixel[0] - new_pixel[0],
                old_pixel[1] - new_pixel[1],
                old_pixel[2] - new_pixel[2],
            ];
            output.put_pixel(x, y, new_color.rgb());

            distribute_error(&mut buffer, x, y, width, height, error);
        }
    }

    debug!("Floyd-Steinberg dithering complete");
    output
}

/// Distribute quantization error to neighboring pixels.
fn distribute_error(
    buffer: &mut [Vec<[i32; 3]>],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    error: [i32; 3],
) {
    let xu = x as usize;
    let yu = y as usize;

    let mut spread = |bx: usize, by: usize, weight: i32| {
        for (c, e) in buffer[by][bx].iter_mut().zip(error) {
            *c += e * weight / 16;
        }
    };

    if x + 1 < width {
        spread(xu + 1, yu, 7);
    }
    if x > 0 && y + 1 < height {
        spread(xu - 1, yu + 1, 3);
    }
    if y + 1 < height {
        spread(xu, yu + 1, 5);
    }
    if x + 1 < width && y + 1 < height {
        spread(xu + 1, yu + 1, 1);
    }
}

/// Map every pixel to its nearest palette color without diffusion.
pub fn nearest_color_convert(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    debug!(width, height, "Applying nearest-color conversion");

    RgbImage::from_fn(width, height, |x, y| {
        let px = img.get_pixel(x, y).0.map(i32::from);
        PaletteColor::nearest(px).rgb()
    })
}
