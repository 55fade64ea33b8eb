//! Detects whether a frame's top cell starts cleanly.
//!
//! After a scroll, the frame boundary can land mid-cell. A clean cell
//! start shows a constant run of background pixels at the top of the
//! sampling column; any variation in that run means the top cell is a
//! continuation of content cut off by the frame edge. The capture loop
//! discards such a first cell on every frame after the first - it is a
//! partial duplicate of the previous frame's last cell.

use image::GrayImage;

use crate::config::CaptureConfig;

/// Returns true when the top of the frame is a truncated continuation of
/// the previous frame's bottom cell.
///
/// Samples `truncation_check_rows` rows at the margin sampling column; a
/// constant run means the top cell starts cleanly.
pub fn is_top_truncated(gray: &GrayImage, config: &CaptureConfig) -> bool {
    let column = if gray.width() > config.margin_offset {
        gray.width() - config.margin_offset
    } else {
        0
    };
    let rows = config.truncation_check_rows.min(gray.height());
    let first = gray.get_pixel(column, 0)[0];

    (1..rows).any(|row| gray.get_pixel(column, row)[0] != first)
}
