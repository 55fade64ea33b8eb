//! Capture configuration.
//!
//! All tunable constants in one place: crop bounds, detection thresholds,
//! and swipe geometry. Loaded from a JSON file when one is given, falling
//! back to compiled defaults tuned against the demo device (a Samsung
//! Galaxy A51 running the inspection app). None of these values are
//! derived; they are empirical.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete capture configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Top edge of the region of interest within the full screenshot.
    #[serde(default = "default_crop_top")]
    pub crop_top: u32,
    /// Bottom edge of the region of interest (exclusive).
    #[serde(default = "default_crop_bottom")]
    pub crop_bottom: u32,
    /// Left edge of the region of interest.
    #[serde(default = "default_crop_left")]
    pub crop_left: u32,
    /// Right edge of the region of interest (exclusive).
    #[serde(default = "default_crop_right")]
    pub crop_right: u32,
    /// Width of the similarity comparison rectangle; stops short of the
    /// right edge so the scroll indicator never counts as a difference.
    #[serde(default = "default_similarity_width")]
    pub similarity_width: u32,
    /// Height of the similarity comparison rectangle.
    #[serde(default = "default_similarity_height")]
    pub similarity_height: u32,
    /// How far in from the right edge pixels are sampled for color
    /// classification and the truncation check, past anti-aliased edges.
    #[serde(default = "default_margin_offset")]
    pub margin_offset: u32,
    /// Rows sampled at the top of a frame to decide truncation.
    #[serde(default = "default_truncation_check_rows")]
    pub truncation_check_rows: u32,
    /// Per-pixel absolute difference below which a pixel counts as noise.
    #[serde(default = "default_pixel_diff_threshold")]
    pub pixel_diff_threshold: u8,
    /// Differing-pixel count below which two frames are the same scroll
    /// position.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u32,
    /// Tail rows ignored when deciding whether to close a final cell at
    /// the bottom edge.
    #[serde(default = "default_bottom_gap_threshold")]
    pub bottom_gap_threshold: u32,
    /// Row span of a full-screen scroll on the target device.
    #[serde(default = "default_full_scroll_rows")]
    pub full_scroll_rows: u32,
    /// Fraction of the computed scroll actually swiped; under-swiping
    /// keeps an overlap between consecutive frames, which the truncation
    /// and similarity checks require.
    #[serde(default = "default_under_swipe_factor")]
    pub under_swipe_factor: f32,
    /// Screen column the swipe gesture runs along.
    #[serde(default = "default_swipe_column")]
    pub swipe_column: u32,
    /// Swipe gesture duration; slow enough that the device treats it as a
    /// drag, not a fling.
    #[serde(default = "default_swipe_duration_ms")]
    pub swipe_duration_ms: u64,
    /// Pause after each swipe before the next capture, letting the scroll
    /// settle.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_crop_top() -> u32 {
    800
}

fn default_crop_bottom() -> u32 {
    2000
}

fn default_crop_left() -> u32 {
    0
}

fn default_crop_right() -> u32 {
    960
}

fn default_similarity_width() -> u32 {
    460
}

fn default_similarity_height() -> u32 {
    800
}

fn default_margin_offset() -> u32 {
    4
}

fn default_truncation_check_rows() -> u32 {
    30
}

fn default_pixel_diff_threshold() -> u8 {
    30
}

fn default_similarity_threshold() -> u32 {
    8000
}

fn default_bottom_gap_threshold() -> u32 {
    2
}

fn default_full_scroll_rows() -> u32 {
    1200
}

fn default_under_swipe_factor() -> f32 {
    0.95
}

fn default_swipe_column() -> u32 {
    0
}

fn default_swipe_duration_ms() -> u64 {
    1900
}

fn default_settle_delay_ms() -> u64 {
    500
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            crop_top: default_crop_top(),
            crop_bottom: default_crop_bottom(),
            crop_left: default_crop_left(),
            crop_right: default_crop_right(),
            similarity_width: default_similarity_width(),
            similarity_height: default_similarity_height(),
            margin_offset: default_margin_offset(),
            truncation_check_rows: default_truncation_check_rows(),
            pixel_diff_threshold: default_pixel_diff_threshold(),
            similarity_threshold: default_similarity_threshold(),
            bottom_gap_threshold: default_bottom_gap_threshold(),
            full_scroll_rows: default_full_scroll_rows(),
            under_swipe_factor: default_under_swipe_factor(),
            swipe_column: default_swipe_column(),
            swipe_duration_ms: default_swipe_duration_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl CaptureConfig {
    /// Width of the region of interest.
    pub fn roi_width(&self) -> u32 {
        self.crop_right - self.crop_left
    }

    /// Height of the region of interest.
    pub fn roi_height(&self) -> u32 {
        self.crop_bottom - self.crop_top
    }

    /// Checks that the crop geometry is usable before the run starts.
    /// A bad value here means the config was written for another device.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.crop_right > self.crop_left,
            "crop_right ({}) must exceed crop_left ({})",
            self.crop_right,
            self.crop_left
        );
        ensure!(
            self.crop_bottom > self.crop_top,
            "crop_bottom ({}) must exceed crop_top ({})",
            self.crop_bottom,
            self.crop_top
        );
        ensure!(
            self.margin_offset >= 1 && self.margin_offset < self.roi_width(),
            "margin_offset ({}) must sample inside the region of interest (width {})",
            self.margin_offset,
            self.roi_width()
        );
        ensure!(
            self.truncation_check_rows >= 2,
            "truncation_check_rows ({}) needs at least two rows to compare",
            self.truncation_check_rows
        );
        ensure!(
            self.under_swipe_factor > 0.0 && self.under_swipe_factor < 1.0,
            "under_swipe_factor ({}) must stay below 1.0 to keep frames overlapping",
            self.under_swipe_factor
        );
        ensure!(
            self.swipe_duration_ms > 0,
            "swipe_duration_ms must be non-zero"
        );
        Ok(())
    }
}

/// Loads configuration from a JSON file, falling back to defaults when the
/// file is absent or malformed.
pub fn load_config(path: Option<&Path>) -> CaptureConfig {
    let Some(path) = path else {
        crate::log("No config file given, using default config");
        return CaptureConfig::default();
    };

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(config) => {
                crate::log(&format!("Config loaded from {}", path.display()));
                config
            }
            Err(e) => {
                crate::log(&format!(
                    "Failed to parse {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
                CaptureConfig::default()
            }
        },
        Err(e) => {
            crate::log(&format!(
                "Failed to read {}: {}. Using defaults.",
                path.display(),
                e
            ));
            CaptureConfig::default()
        }
    }
}
