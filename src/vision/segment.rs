//! Frame segmentation along the right-hand sampling column.
//!
//! Each logical UI row renders as a band of uniform background color, so a
//! color change between two adjacent rows marks a cell boundary. Only the
//! last column of the region of interest is sampled, keeping the scan
//! linear in the row count.

use image::{imageops, GrayImage, RgbImage};

use crate::config::CaptureConfig;

/// Scans for cell boundaries down the last column of the region of
/// interest.
///
/// Returns row indices, always starting at 0 and strictly increasing. A
/// boundary is recorded at the later row of every adjacent pair whose
/// sampled values differ. With `pad_to_bottom`, a final boundary is
/// appended at the bottom edge when the tail gap exceeds the configured
/// noise guard, so content running to the very bottom of the frame still
/// forms a cell. The capture loop always pads; the flag exists for callers
/// that know the bottom cell is already closed.
pub fn find_boundaries(
    gray: &GrayImage,
    pad_to_bottom: bool,
    config: &CaptureConfig,
) -> Vec<u32> {
    let height = gray.height();
    let column = gray.width() - 1;
    let mut boundaries = vec![0u32];

    for row in 0..height.saturating_sub(1) {
        let value = gray.get_pixel(column, row)[0];
        let next = gray.get_pixel(column, row + 1)[0];
        if value != next {
            boundaries.push(row + 1);
        }
    }

    let last = *boundaries.last().unwrap_or(&0);
    if pad_to_bottom && height - last > config.bottom_gap_threshold {
        boundaries.push(height);
    }

    boundaries
}

/// Slices the grayscale region of interest into one sub-image per
/// consecutive boundary pair.
pub fn gray_cells(gray: &GrayImage, boundaries: &[u32]) -> Vec<GrayImage> {
    assert_increasing(boundaries);
    boundaries
        .windows(2)
        .map(|pair| {
            imageops::crop_imm(gray, 0, pair[0], gray.width(), pair[1] - pair[0]).to_image()
        })
        .collect()
}

/// Slices the color region of interest along the same boundaries found on
/// the grayscale form.
pub fn color_cells(color: &RgbImage, boundaries: &[u32]) -> Vec<RgbImage> {
    assert_increasing(boundaries);
    boundaries
        .windows(2)
        .map(|pair| {
            imageops::crop_imm(color, 0, pair[0], color.width(), pair[1] - pair[0]).to_image()
        })
        .collect()
}

/// Boundary lists are produced strictly increasing; anything else means the
/// caller mixed up frames and must fail loudly, not be silently corrected.
fn assert_increasing(boundaries: &[u32]) {
    assert!(
        boundaries.windows(2).all(|pair| pair[0] < pair[1]),
        "cell boundaries must be strictly increasing: {:?}",
        boundaries
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn segment_config() -> CaptureConfig {
        CaptureConfig {
            bottom_gap_threshold: 2,
            ..CaptureConfig::default()
        }
    }

    /// Builds an image whose last column carries the given values, one per
    /// row.
    fn column_image(width: u32, values: &[u8]) -> GrayImage {
        GrayImage::from_fn(width, values.len() as u32, |_, y| {
            Luma([values[y as usize]])
        })
    }

    #[test]
    fn test_boundary_scan() {
        let gray = column_image(4, &[10, 10, 10, 10, 50, 50, 90, 90, 90]);
        let boundaries = find_boundaries(&gray, true, &segment_config());

        assert_eq!(boundaries, vec![0, 4, 6, 9]);

        let heights: Vec<u32> = boundaries.windows(2).map(|p| p[1] - p[0]).collect();
        assert_eq!(heights, vec![4, 2, 3]);
        assert_eq!(heights.iter().sum::<u32>(), gray.height());
    }

    #[test]
    fn test_boundaries_strictly_increasing_from_zero() {
        let gray = column_image(4, &[1, 2, 3, 3, 4, 4, 4, 9]);
        let boundaries = find_boundaries(&gray, true, &segment_config());

        assert_eq!(boundaries[0], 0);
        assert!(boundaries.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_uniform_frame_yields_single_cell() {
        let gray = column_image(4, &[42; 12]);
        let boundaries = find_boundaries(&gray, true, &segment_config());

        assert_eq!(boundaries, vec![0, 12]);
        assert_eq!(gray_cells(&gray, &boundaries).len(), 1);
    }

    #[test]
    fn test_no_padding_without_flag() {
        let gray = column_image(4, &[10, 10, 10, 10, 50, 50, 90, 90, 90]);
        let boundaries = find_boundaries(&gray, false, &segment_config());

        assert_eq!(boundaries, vec![0, 4, 6]);
    }

    #[test]
    fn test_tail_gap_at_noise_guard_not_padded() {
        // Final transition lands two rows from the bottom; a 2-row tail is
        // within the noise guard and must not become a cell.
        let gray = column_image(4, &[10, 10, 10, 10, 50, 50, 50, 90, 90]);
        let boundaries = find_boundaries(&gray, true, &segment_config());

        assert_eq!(boundaries, vec![0, 4, 7]);
    }

    #[test]
    fn test_cell_slices_cover_boundaries() {
        let gray = column_image(6, &[10, 10, 10, 10, 50, 50, 90, 90, 90]);
        let boundaries = find_boundaries(&gray, true, &segment_config());
        let cells = gray_cells(&gray, &boundaries);

        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].dimensions(), (6, 4));
        assert_eq!(cells[1].dimensions(), (6, 2));
        assert_eq!(cells[2].dimensions(), (6, 3));
        assert_eq!(cells[1].get_pixel(5, 0)[0], 50);
    }

    #[test]
    fn test_color_cells_follow_gray_boundaries() {
        use image::Rgb;

        let color = RgbImage::from_fn(6, 9, |_, y| {
            if y < 4 {
                Rgb([10, 10, 10])
            } else {
                Rgb([50, 50, 50])
            }
        });
        let cells = color_cells(&color, &[0, 4, 9]);

        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].dimensions(), (6, 4));
        assert_eq!(cells[1].dimensions(), (6, 5));
        assert_eq!(cells[1].get_pixel(0, 0)[0], 50);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_unordered_boundaries_rejected() {
        let gray = GrayImage::new(4, 8);
        gray_cells(&gray, &[0, 5, 3]);
    }
}
