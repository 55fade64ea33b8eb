//! Perceptual comparison of consecutive frames.
//!
//! Two frames at the same scroll position still differ in scattered pixels
//! (dithering, the scroll indicator fading in and out), so equality is
//! counted, not exact: pixels whose absolute difference exceeds a per-pixel
//! noise threshold are tallied, and the frames are declared identical when
//! the tally stays under a global threshold. Identical consecutive frames
//! mean the last swipe produced no new content - the bottom of the
//! scrollable area has been reached.
//!
//! Only a fixed top-left sub-rectangle is compared; the right edge is
//! excluded because the scroll indicator lives there.

use image::GrayImage;

use crate::config::CaptureConfig;

/// Counts pixels of the comparison sub-rectangle whose absolute difference
/// exceeds the per-pixel noise threshold.
///
/// Both frames are crops with the same configured bounds; a shape mismatch
/// means frames from different runs were mixed up.
pub fn pixel_difference_count(a: &GrayImage, b: &GrayImage, config: &CaptureConfig) -> u32 {
    assert_eq!(
        a.dimensions(),
        b.dimensions(),
        "similarity inputs must share dimensions"
    );

    let width = config.similarity_width.min(a.width());
    let height = config.similarity_height.min(a.height());
    let mut differing = 0u32;

    for y in 0..height {
        for x in 0..width {
            let diff = (i16::from(a.get_pixel(x, y)[0]) - i16::from(b.get_pixel(x, y)[0]))
                .unsigned_abs();
            if diff > u16::from(config.pixel_diff_threshold) {
                differing += 1;
            }
        }
    }

    differing
}

/// Returns true when two frames show the same scroll position.
pub fn frames_similar(a: &GrayImage, b: &GrayImage, config: &CaptureConfig) -> bool {
    let differing = pixel_difference_count(a, b, config);
    crate::log(&format!("Similarity count is {}", differing));
    differing < config.similarity_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn similarity_config() -> CaptureConfig {
        CaptureConfig {
            similarity_width: 10,
            similarity_height: 10,
            pixel_diff_threshold: 30,
            similarity_threshold: 5,
            ..CaptureConfig::default()
        }
    }

    #[test]
    fn test_identical_frames_similar() {
        let a = GrayImage::from_pixel(12, 12, Luma([100]));
        let b = a.clone();
        assert!(frames_similar(&a, &b, &similarity_config()));
    }

    #[test]
    fn test_noise_below_pixel_threshold_ignored() {
        let a = GrayImage::from_pixel(12, 12, Luma([100]));
        let b = GrayImage::from_pixel(12, 12, Luma([120]));
        assert_eq!(pixel_difference_count(&a, &b, &similarity_config()), 0);
        assert!(frames_similar(&a, &b, &similarity_config()));
    }

    #[test]
    fn test_large_differences_counted() {
        let a = GrayImage::from_pixel(12, 12, Luma([100]));
        let b = GrayImage::from_pixel(12, 12, Luma([200]));
        assert_eq!(pixel_difference_count(&a, &b, &similarity_config()), 100);
        assert!(!frames_similar(&a, &b, &similarity_config()));
    }

    #[test]
    fn test_symmetric() {
        let a = GrayImage::from_fn(12, 12, |x, y| Luma([(x * 17 + y * 3) as u8]));
        let b = GrayImage::from_fn(12, 12, |x, y| Luma([(x * 5 + y * 11) as u8]));
        let config = similarity_config();

        assert_eq!(
            pixel_difference_count(&a, &b, &config),
            pixel_difference_count(&b, &a, &config)
        );
        assert_eq!(
            frames_similar(&a, &b, &config),
            frames_similar(&b, &a, &config)
        );
    }

    #[test]
    fn test_changes_outside_subrectangle_ignored() {
        let a = GrayImage::from_pixel(12, 12, Luma([100]));
        let mut b = a.clone();
        // Bottom-right corner sits outside the 10x10 comparison rect.
        b.put_pixel(11, 11, Luma([255]));

        assert_eq!(pixel_difference_count(&a, &b, &similarity_config()), 0);
    }

    #[test]
    #[should_panic(expected = "share dimensions")]
    fn test_shape_mismatch_fails_loudly() {
        let a = GrayImage::new(12, 12);
        let b = GrayImage::new(10, 12);
        pixel_difference_count(&a, &b, &similarity_config());
    }
}
