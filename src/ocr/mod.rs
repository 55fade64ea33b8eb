//! Text extraction collaborator interface.
//!
//! The loop hands each cell's grayscale sub-image to a `TextReader` and
//! gets back whatever text it contains, possibly empty. The shipped
//! implementation shells out to Tesseract; tests substitute fakes.

pub mod preprocess;
pub mod tesseract;

pub use preprocess::invert_cell;
pub use tesseract::TesseractReader;

use anyhow::Result;
use image::GrayImage;

/// Extracts text from a cell image.
pub trait TextReader {
    /// Returns the text visible in the image, or an empty string when
    /// there is none. Empty is a valid result, not an error.
    fn extract_text(&self, img: &GrayImage) -> Result<String>;
}

/// Collapses runs of whitespace (including line breaks from multi-line
/// cells) to single spaces and trims the ends. Recognized text is
/// deduplicated by exact match, so it has to be normalized first.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("Last  travel\n12:30\n"), "Last travel 12:30");
        assert_eq!(normalize_text("  spaced   out  "), "spaced out");
    }

    #[test]
    fn test_normalize_empty_stays_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t "), "");
    }
}
