//! Adaptive scroll planning.
//!
//! The next swipe should bring the start of the current frame's last
//! fully-detected cell to the top of the screen, so the next frame begins
//! where this one's usable content ends. Scrolling exactly that far would
//! leave no overlap, and both the truncation check and the end-of-scroll
//! comparison need one - hence the under-swipe factor.

use crate::config::CaptureConfig;

/// Computes the swipe distance in screen rows for the next scroll.
///
/// Takes the second-to-last boundary (the start row of the last
/// fully-detected cell) as a fraction of the region height, scaled to the
/// device's full-scroll row span and damped by the under-swipe factor.
/// Fewer than two boundaries means nothing was detected to scroll past;
/// the zero-distance swipe yields an identical next frame, which
/// terminates the run.
pub fn plan_scroll(boundaries: &[u32], roi_height: u32, config: &CaptureConfig) -> u32 {
    if boundaries.len() < 2 || roi_height == 0 {
        return 0;
    }

    let last_cell_start = boundaries[boundaries.len() - 2];
    let fraction = last_cell_start as f32 / roi_height as f32;

    (fraction * config.full_scroll_rows as f32 * config.under_swipe_factor).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner_config() -> CaptureConfig {
        CaptureConfig {
            full_scroll_rows: 1200,
            under_swipe_factor: 0.95,
            ..CaptureConfig::default()
        }
    }

    #[test]
    fn test_scales_last_cell_start() {
        // Last full cell starts at row 900 of 1200: three quarters of a
        // full scroll, damped by the under-swipe factor.
        let distance = plan_scroll(&[0, 300, 900, 1200], 1200, &planner_config());
        assert_eq!(distance, (0.75f32 * 1200.0 * 0.95).round() as u32);
    }

    #[test]
    fn test_under_swipe_shortens_distance() {
        let config = planner_config();
        let distance = plan_scroll(&[0, 600, 1200], 1200, &config);
        let full = (600.0f32 / 1200.0 * config.full_scroll_rows as f32).round() as u32;
        assert!(distance < full);
    }

    #[test]
    fn test_single_boundary_scrolls_nowhere() {
        assert_eq!(plan_scroll(&[0], 1200, &planner_config()), 0);
        assert_eq!(plan_scroll(&[], 1200, &planner_config()), 0);
    }

    #[test]
    fn test_single_cell_frame_scrolls_nowhere() {
        // One cell spanning the whole region: its start row is 0.
        assert_eq!(plan_scroll(&[0, 1200], 1200, &planner_config()), 0);
    }
}
