//! Captured frame cropped to the region of interest.
//!
//! A frame holds the grayscale and color forms of the same fixed crop of a
//! full device screenshot. The crop excludes status and navigation chrome;
//! everything downstream (segmentation, truncation, similarity, color
//! sampling) works in region-of-interest coordinates.

use anyhow::{ensure, Result};
use image::{imageops, GrayImage, RgbImage};

use crate::config::CaptureConfig;

/// One captured frame, cropped to the region of interest.
///
/// Immutable once built; the capture loop consumes it within a single
/// iteration, keeping only the grayscale form around as "previous" for the
/// next iteration's similarity check.
pub struct Frame {
    gray: GrayImage,
    color: RgbImage,
}

impl Frame {
    /// Crops a full screenshot down to the region of interest and derives
    /// the grayscale form.
    ///
    /// Fails when the screenshot is smaller than the configured crop
    /// bounds - that means the config was tuned for a different device.
    pub fn from_screenshot(screenshot: &RgbImage, config: &CaptureConfig) -> Result<Frame> {
        ensure!(
            screenshot.width() >= config.crop_right && screenshot.height() >= config.crop_bottom,
            "screenshot {}x{} is smaller than the configured crop bounds {}x{}",
            screenshot.width(),
            screenshot.height(),
            config.crop_right,
            config.crop_bottom,
        );

        let color = imageops::crop_imm(
            screenshot,
            config.crop_left,
            config.crop_top,
            config.roi_width(),
            config.roi_height(),
        )
        .to_image();
        let gray = imageops::grayscale(&color);

        Ok(Frame { gray, color })
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn color(&self) -> &RgbImage {
        &self.color
    }

    /// Height of the region of interest in rows.
    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    /// Consumes the frame, keeping only the grayscale form.
    pub fn into_gray(self) -> GrayImage {
        self.gray
    }
}
