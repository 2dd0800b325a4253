//! The three-color e-paper palette.

use image::Rgb;

use crate::ImageError;

/// One of the three inks the display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Black,
    White,
    Red,
}

impl PaletteColor {
    /// All palette entries in palette order. Nearest-color ties resolve
    /// to the earlier entry.
    pub const ALL: [PaletteColor; 3] = [PaletteColor::Black, PaletteColor::White, PaletteColor::Red];

    pub const fn rgb(self) -> Rgb<u8> {
        match self {
            PaletteColor::Black => Rgb([0, 0, 0]),
            PaletteColor::White => Rgb([255, 255, 255]),
            PaletteColor::Red => Rgb([255, 0, 0]),
        }
    }

    /// Find the palette entry closest to `color` by squared RGB distance.
    pub fn nearest(color: [i32; 3]) -> PaletteColor {
        let mut best = PaletteColor::Black;
        let mut best_dist = i32::MAX;
        for candidate in Self::ALL {
            let dist = candidate.distance_sq(color);
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }

    fn distance_sq(self, color: [i32; 3]) -> i32 {
        let Rgb(p) = self.rgb();
        p.iter()
            .zip(color)
            .map(|(&a, b)| {
                let d = i32::from(a) - b;
                d * d
            })
            .sum()
    }
}

impl TryFrom<Rgb<u8>> for PaletteColor {
    type Error = ImageError;

    /// Exact match only. Coordinates are unknown here and reported as 0;
    /// callers with positions should rebuild the error.
    fn try_from(value: Rgb<u8>) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.rgb() == value)
            .ok_or(ImageError::UnmappedColor {
                x: 0,
                y: 0,
                rgb: value.0,
            })
    }
}
