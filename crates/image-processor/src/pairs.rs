//! Flattening a quantized image into adjacent pixel pairs.

use image::RgbImage;
use tracing::debug;

use crate::palette::PaletteColor;
use crate::{ImageError, Result};

/// Two horizontally adjacent pixels in row-major scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPair(pub PaletteColor, pub PaletteColor);

/// Flatten `img` row by row and pair pixel `2k` with pixel `2k + 1`.
///
/// Every pixel must already be a palette color. A pair may straddle a
/// row boundary when the width is odd; the total pixel count must be even.
pub fn pixel_pairs(img: &RgbImage) -> Result<Vec<PixelPair>> {
    let (width, height) = img.dimensions();
    let total = width as usize * height as usize;
    if total % 2 != 0 {
        return Err(ImageError::OddPixelCount(total));
    }

    let colors = img
        .enumerate_pixels()
        .map(|(x, y, px)| {
            PaletteColor::try_from(*px).map_err(|_| ImageError::UnmappedColor { x, y, rgb: px.0 })
        })
        .collect::<Result<Vec<_>>>()?;

    let pairs: Vec<PixelPair> = colors
        .chunks_exact(2)
        .map(|pair| PixelPair(pair[0], pair[1]))
        .collect();

    debug!(width, height, pairs = pairs.len(), "Flattened image into pixel pairs");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_pairs_row_major_order() {
        let mut img = RgbImage::from_pixel(4, 2, PaletteColor::White.rgb());
        img.put_pixel(1, 0, PaletteColor::Red.rgb());
        img.put_pixel(2, 1, PaletteColor::Black.rgb());

        let pairs = pixel_pairs(&img).unwrap();

        assert_eq!(
            pairs,
            vec![
                PixelPair(PaletteColor::White, PaletteColor::Red),
                PixelPair(PaletteColor::White, PaletteColor::White),
                PixelPair(PaletteColor::White, PaletteColor::White),
                PixelPair(PaletteColor::Black, PaletteColor::White),
            ]
        );
    }

    #[test]
    fn test_pairs_straddle_rows_for_odd_width() {
        // 3x2: pixels (2,0) and (0,1) form the second pair
        let mut img = RgbImage::from_pixel(3, 2, PaletteColor::White.rgb());
        img.put_pixel(2, 0, PaletteColor::Black.rgb());
        img.put_pixel(0, 1, PaletteColor::Red.rgb());

        let pairs = pixel_pairs(&img).unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1], PixelPair(PaletteColor::Black, PaletteColor::Red));
    }

    #[test]
    fn test_pairs_count_is_half_pixels() {
        let img = RgbImage::from_pixel(640, 384, PaletteColor::Black.rgb());
        assert_eq!(pixel_pairs(&img).unwrap().len(), 640 * 384 / 2);
    }

    #[test]
    fn test_pairs_odd_pixel_count() {
        let img = RgbImage::from_pixel(3, 3, PaletteColor::White.rgb());
        let err = pixel_pairs(&img).unwrap_err();
        assert!(matches!(err, ImageError::OddPixelCount(9)));
    }

    #[test]
    fn test_pairs_unmapped_color_reports_position() {
        let mut img = RgbImage::from_pixel(4, 2, PaletteColor::White.rgb());
        img.put_pixel(3, 1, Rgb([12, 34, 56]));

        let err = pixel_pairs(&img).unwrap_err();

        assert!(matches!(
            err,
            ImageError::UnmappedColor { x: 3, y: 1, rgb: [12, 34, 56] }
        ));
    }

    #[test]
    fn test_pairs_empty_image() {
        let img = RgbImage::new(0, 0);
        assert!(pixel_pairs(&img).unwrap().is_empty());
    }
}
