//! Semantic background colors of inspection cells.
//!
//! The device renders cell backgrounds from a small fixed palette, so a
//! classification is an exact lookup against known channel triples. No
//! fuzzy matching: the sample point sits a few columns in from the cell's
//! right edge, past any anti-aliased boundary pixels, where the background
//! is bit-exact.

use image::RgbImage;

use crate::config::CaptureConfig;

/// Background color of a cell, as rendered by the inspection UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLabel {
    Unknown,
    Red,
    Purple,
    White,
    Green,
    Blue,
    NavyBlue,
    Yellow,
}

/// Known background triples in blue-green-red channel order, the order of
/// the capture stack these constants were tuned against.
const COLOR_TABLE: [([u8; 3], ColorLabel); 7] = [
    ([127, 0, 127], ColorLabel::Purple),
    ([0, 0, 255], ColorLabel::Red),
    ([0, 255, 0], ColorLabel::Green),
    ([255, 255, 255], ColorLabel::White),
    ([255, 0, 0], ColorLabel::Blue),
    ([127, 0, 63], ColorLabel::NavyBlue),
    ([0, 180, 255], ColorLabel::Yellow),
];

impl ColorLabel {
    /// Classifies a single pixel given in blue-green-red channel order.
    ///
    /// Total and deterministic: any triple not in the table is `Unknown`,
    /// which is a valid label, not an error.
    pub fn classify(bgr: [u8; 3]) -> ColorLabel {
        for (triple, label) in COLOR_TABLE {
            if triple == bgr {
                return label;
            }
        }
        ColorLabel::Unknown
    }

    /// Backgrounds dark enough that OCR needs the cell inverted first.
    pub fn needs_inversion(self) -> bool {
        matches!(self, ColorLabel::Red | ColorLabel::NavyBlue)
    }
}

impl std::fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorLabel::Unknown => "UNKNOWN",
            ColorLabel::Red => "RED",
            ColorLabel::Purple => "PURPLE",
            ColorLabel::White => "WHITE",
            ColorLabel::Green => "GREEN",
            ColorLabel::Blue => "BLUE",
            ColorLabel::NavyBlue => "NAVY_BLUE",
            ColorLabel::Yellow => "YELLOW",
        };
        write!(f, "{}", name)
    }
}

/// Determines the background color of one cell sub-image.
///
/// Samples the first row, `margin_offset` columns in from the right edge,
/// and looks the triple up in the palette table.
pub fn classify_cell(cell: &RgbImage, config: &CaptureConfig) -> ColorLabel {
    let x = if cell.width() > config.margin_offset {
        cell.width() - config.margin_offset
    } else {
        0
    };
    let pixel = cell.get_pixel(x, 0);
    ColorLabel::classify([pixel[2], pixel[1], pixel[0]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_known_triples() {
        assert_eq!(ColorLabel::classify([127, 0, 127]), ColorLabel::Purple);
        assert_eq!(ColorLabel::classify([0, 0, 255]), ColorLabel::Red);
        assert_eq!(ColorLabel::classify([0, 255, 0]), ColorLabel::Green);
        assert_eq!(ColorLabel::classify([255, 255, 255]), ColorLabel::White);
        assert_eq!(ColorLabel::classify([255, 0, 0]), ColorLabel::Blue);
        assert_eq!(ColorLabel::classify([127, 0, 63]), ColorLabel::NavyBlue);
        assert_eq!(ColorLabel::classify([0, 180, 255]), ColorLabel::Yellow);
    }

    #[test]
    fn test_unlisted_triple_is_unknown() {
        assert_eq!(ColorLabel::classify([1, 2, 3]), ColorLabel::Unknown);
        assert_eq!(ColorLabel::classify([0, 0, 254]), ColorLabel::Unknown);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for triple in [[127, 0, 127], [1, 2, 3], [255, 255, 255]] {
            assert_eq!(ColorLabel::classify(triple), ColorLabel::classify(triple));
        }
    }

    #[test]
    fn test_inversion_backgrounds() {
        assert!(ColorLabel::Red.needs_inversion());
        assert!(ColorLabel::NavyBlue.needs_inversion());
        assert!(!ColorLabel::White.needs_inversion());
        assert!(!ColorLabel::Unknown.needs_inversion());
    }

    #[test]
    fn test_classify_cell_samples_inside_margin() {
        let config = CaptureConfig {
            margin_offset: 4,
            ..CaptureConfig::default()
        };

        // Red background (RGB [255, 0, 0]) with a lighter anti-aliased
        // strip on the right edge that the margin must skip over.
        let mut cell = RgbImage::from_pixel(20, 5, Rgb([255, 0, 0]));
        for y in 0..5 {
            cell.put_pixel(19, y, Rgb([200, 40, 40]));
        }

        assert_eq!(classify_cell(&cell, &config), ColorLabel::Red);
    }

    #[test]
    fn test_classify_cell_narrow_cell_falls_back_to_first_column() {
        let config = CaptureConfig {
            margin_offset: 4,
            ..CaptureConfig::default()
        };
        let cell = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        assert_eq!(classify_cell(&cell, &config), ColorLabel::White);
    }
}
