//! Display controller wire format.
//!
//! Each pair of adjacent pixels becomes one lowercase letter. Letters are
//! sent in chunks embedded in the request path:
//! - `POST /EPDu_`             start a new frame
//! - `POST /{chunk}iodaLOAD_`  append up to 1000 symbols
//! - `POST /SHOW_`             refresh the panel

use image_processor::PaletteColor::{Black, Red, White};
use image_processor::PixelPair;
use tracing::debug;

/// Maximum number of symbols per upload request.
pub const CHUNK_SIZE: usize = 1000;

/// Path that resets the controller's frame buffer.
pub const INIT_PATH: &str = "EPDu_";

/// Path that commits the uploaded frame to the panel.
pub const SHOW_PATH: &str = "SHOW_";

/// Suffix appended to every chunk upload path.
const LOAD_SUFFIX: &str = "iodaLOAD_";

/// Encode one pixel pair as its symbol.
pub const fn symbol_for(pair: PixelPair) -> char {
    match pair {
        PixelPair(White, White) => 'f',
        PixelPair(White, Red) => 'n',
        PixelPair(White, Black) => 'b',
        PixelPair(Red, White) => 'h',
        PixelPair(Red, Red) => 'p',
        PixelPair(Red, Black) => 'd',
        PixelPair(Black, White) => 'e',
        PixelPair(Black, Red) => 'm',
        PixelPair(Black, Black) => 'a',
    }
}

/// Decode a symbol back into its pixel pair.
pub const fn pair_for(symbol: char) -> Option<PixelPair> {
    let pair = match symbol {
        'f' => PixelPair(White, White),
        'n' => PixelPair(White, Red),
        'b' => PixelPair(White, Black),
        'h' => PixelPair(Red, White),
        'p' => PixelPair(Red, Red),
        'd' => PixelPair(Red, Black),
        'e' => PixelPair(Black, White),
        'm' => PixelPair(Black, Red),
        'a' => PixelPair(Black, Black),
        _ => return None,
    };
    Some(pair)
}

/// Encode pixel pairs into a symbol string.
pub fn encode_pairs(pairs: &[PixelPair]) -> String {
    pairs.iter().map(|&pair| symbol_for(pair)).collect()
}

/// Split symbols into chunks of exactly `size` characters; only the last
/// chunk may be shorter. Empty input yields no chunks.
///
/// # Panics
/// Panics if `size` is zero.
pub fn chunk_symbols(symbols: &str, size: usize) -> Vec<String> {
    assert!(size > 0, "Chunk size must be greater than 0");
    // Symbols are ASCII, so byte chunks are char chunks.
    symbols
        .as_bytes()
        .chunks(size)
        .map(|chunk| chunk.iter().map(|&b| char::from(b)).collect())
        .collect()
}

/// Request path for one chunk upload.
pub fn chunk_path(chunk: &str) -> String {
    format!("{chunk}{LOAD_SUFFIX}")
}

/// An encoded frame ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    chunks: Vec<String>,
}

impl UploadPlan {
    /// Encode and chunk `pairs` using [`CHUNK_SIZE`].
    pub fn from_pairs(pairs: &[PixelPair]) -> Self {
        let symbols = encode_pairs(pairs);
        let chunks = chunk_symbols(&symbols, CHUNK_SIZE);
        debug!(
            pairs = pairs.len(),
            chunks = chunks.len(),
            "Built upload plan"
        );
        Self { chunks }
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Total number of symbols across all chunks.
    pub fn symbol_count(&self) -> usize {
        self.chunks.iter().map(String::len).sum()
    }

    /// Every request path in send order: init, one per chunk, show.
    pub fn request_paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(self.chunks.len() + 2);
        paths.push(INIT_PATH.to_string());
        paths.extend(self.chunks.iter().map(|c| chunk_path(c)));
        paths.push(SHOW_PATH.to_string());
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_processor::PaletteColor;
    use std::collections::HashSet;

    fn all_pairs() -> Vec<PixelPair> {
        PaletteColor::ALL
            .iter()
            .flat_map(|&a| PaletteColor::ALL.iter().map(move |&b| PixelPair(a, b)))
            .collect()
    }

    #[test]
    fn test_symbol_table_is_injective() {
        let symbols: HashSet<char> = all_pairs().into_iter().map(symbol_for).collect();
        assert_eq!(symbols.len(), 9);
        assert!(symbols.iter().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_symbol_table_matches_lookup() {
        for pair in all_pairs() {
            assert_eq!(pair_for(symbol_for(pair)), Some(pair));
        }
        assert_eq!(pair_for('z'), None);
    }

    #[test]
    fn test_known_symbols() {
        assert_eq!(symbol_for(PixelPair(White, White)), 'f');
        assert_eq!(symbol_for(PixelPair(Black, Black)), 'a');
        assert_eq!(symbol_for(PixelPair(Red, Red)), 'p');
        assert_eq!(symbol_for(PixelPair(White, Red)), 'n');
        assert_eq!(symbol_for(PixelPair(Black, White)), 'e');
    }

    #[test]
    fn test_encode_pairs_preserves_order() {
        let pairs = [
            PixelPair(Black, Black),
            PixelPair(White, Black),
            PixelPair(Red, Black),
        ];
        assert_eq!(encode_pairs(&pairs), "abd");
    }

    #[test]
    fn test_chunk_sizes() {
        let symbols = "f".repeat(2500);
        let chunks = chunk_symbols(&symbols, CHUNK_SIZE);
        let sizes: Vec<usize> = chunks.iter().map(String::len).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
    }

    #[test]
    fn test_chunk_exact_multiple_has_no_empty_tail() {
        let chunks = chunk_symbols(&"a".repeat(3000), CHUNK_SIZE);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == CHUNK_SIZE));
    }

    #[test]
    fn test_chunk_empty_input() {
        assert!(chunk_symbols("", CHUNK_SIZE).is_empty());
    }

    #[test]
    fn test_chunk_concatenation_restores_input() {
        let symbols: String = "abdefhmnp".repeat(250);
        let chunks = chunk_symbols(&symbols, CHUNK_SIZE);
        assert_eq!(chunks.concat(), symbols);
    }

    #[test]
    #[should_panic(expected = "Chunk size must be greater than 0")]
    fn test_chunk_zero_size() {
        chunk_symbols("abc", 0);
    }

    #[test]
    fn test_plan_for_full_frame() {
        let pairs = vec![PixelPair(White, White); 640 * 384 / 2];
        let plan = UploadPlan::from_pairs(&pairs);
        // 122880 pairs -> 123 chunks, the last holding 880 symbols
        assert_eq!(plan.chunks().len(), 123);
        assert_eq!(plan.chunks().last().map(String::len), Some(880));
        assert_eq!(plan.symbol_count(), pairs.len());
    }

    #[test]
    fn test_request_paths_order() {
        let pairs = vec![PixelPair(Black, Red); 1500];
        let plan = UploadPlan::from_pairs(&pairs);
        let paths = plan.request_paths();

        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], "EPDu_");
        assert_eq!(paths[1], format!("{}iodaLOAD_", "m".repeat(1000)));
        assert_eq!(paths[2], format!("{}iodaLOAD_", "m".repeat(500)));
        assert_eq!(paths[3], "SHOW_");
    }

    #[test]
    fn test_request_paths_empty_frame() {
        let plan = UploadPlan::from_pairs(&[]);
        assert_eq!(plan.request_paths(), vec!["EPDu_", "SHOW_"]);
    }
}
