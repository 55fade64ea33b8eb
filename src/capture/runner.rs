//! Capture loop state machine.
//!
//! Sequences device capture, segmentation, truncation and similarity
//! checks, accumulation, and scroll planning, one frame at a time:
//! Capturing → Accumulating (frame 1) or Comparing (later frames) →
//! Scrolling → Capturing, until two consecutive frames match and the
//! bottom of the scrollable content is reached.
//!
//! Everything is strictly sequential. The device's visible content
//! depends on the previous swipe having settled, and retraction depends
//! on frames arriving in order, so no step overlaps another.

use anyhow::{anyhow, Result};
use image::GrayImage;
use std::fs;
use std::thread;
use std::time::Duration;

use crate::capture::accumulator::{Accumulator, CaptureRecord};
use crate::capture::planner::plan_scroll;
use crate::config::CaptureConfig;
use crate::device::Device;
use crate::ocr::{invert_cell, normalize_text, TextReader};
use crate::paths::SessionPaths;
use crate::vision::{
    classify_cell, color_cells, find_boundaries, frames_similar, gray_cells, is_top_truncated,
    Frame,
};

/// Capture loop states.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    /// Pulling the next frame from the device
    Capturing,
    /// Checking the new frame against the previous scroll position
    Comparing,
    /// Segmenting, classifying, and recording the current frame's cells
    Accumulating,
    /// Planning and issuing the next swipe
    Scrolling,
    /// Bottom of the scrollable content reached
    Complete,
    /// Fatal collaborator failure
    Error(String),
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureState::Capturing => write!(f, "Capturing"),
            CaptureState::Comparing => write!(f, "Comparing"),
            CaptureState::Accumulating => write!(f, "Accumulating"),
            CaptureState::Scrolling => write!(f, "Scrolling"),
            CaptureState::Complete => write!(f, "Complete"),
            CaptureState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// One capture run over one device.
///
/// Owns the collaborators and all mutable run state: the accumulator, the
/// previous frame, and the 1-based frame counter.
pub struct CaptureRun<'a, D: Device, R: TextReader> {
    /// Current state
    pub state: CaptureState,
    device: D,
    reader: R,
    config: &'a CaptureConfig,
    session: &'a SessionPaths,
    accumulator: Accumulator,
    /// Frame being processed this iteration
    current: Option<Frame>,
    /// Previous frame's grayscale region, kept for the similarity check
    prev_gray: Option<GrayImage>,
    /// Cell boundaries of the current frame, for scroll planning
    boundaries: Vec<u32>,
    /// 1-based frame counter
    frame_index: u32,
}

impl<'a, D: Device, R: TextReader> CaptureRun<'a, D, R> {
    pub fn new(
        device: D,
        reader: R,
        config: &'a CaptureConfig,
        session: &'a SessionPaths,
    ) -> Self {
        Self {
            state: CaptureState::Capturing,
            device,
            reader,
            config,
            session,
            accumulator: Accumulator::new(),
            current: None,
            prev_gray: None,
            boundaries: Vec::new(),
            frame_index: 1,
        }
    }

    /// Advances the state machine by one step.
    ///
    /// Returns `Ok(true)` while the run should continue, `Ok(false)` once
    /// it has completed or failed.
    pub fn step(&mut self) -> Result<bool> {
        match &self.state {
            CaptureState::Capturing => {
                crate::log(&format!("Capturing screen {}, please wait", self.frame_index));

                let screenshot = match self.device.capture_frame() {
                    Ok(screenshot) => screenshot,
                    Err(e) => {
                        self.state = CaptureState::Error(format!("Frame capture failed: {}", e));
                        return Ok(false);
                    }
                };

                let frame = match Frame::from_screenshot(&screenshot, self.config) {
                    Ok(frame) => frame,
                    Err(e) => {
                        self.state = CaptureState::Error(format!("Frame crop failed: {}", e));
                        return Ok(false);
                    }
                };

                let frame_path = self.session.frame_image(self.frame_index);
                if let Err(e) = screenshot.save(&frame_path) {
                    self.state = CaptureState::Error(format!(
                        "Failed to save {}: {}",
                        frame_path.display(),
                        e
                    ));
                    return Ok(false);
                }

                self.current = Some(frame);
                self.state = if self.frame_index == 1 {
                    CaptureState::Accumulating
                } else {
                    CaptureState::Comparing
                };
                Ok(true)
            }

            CaptureState::Comparing => {
                let Some(frame) = self.current.as_ref() else {
                    self.state = CaptureState::Error("no frame to compare".to_string());
                    return Ok(false);
                };
                let Some(prev) = self.prev_gray.as_ref() else {
                    self.state =
                        CaptureState::Error("comparison without a previous frame".to_string());
                    return Ok(false);
                };

                if frames_similar(frame.gray(), prev, self.config) {
                    // The last swipe produced no new content: the bottom is
                    // reached and this frame is a duplicate of the previous
                    // one. Its artifact is redundant too.
                    crate::log(&format!(
                        "Screen {} matches the previous frame, bottom reached",
                        self.frame_index
                    ));
                    let duplicate = self.session.frame_image(self.frame_index);
                    if let Err(e) = fs::remove_file(&duplicate) {
                        crate::log(&format!(
                            "Warning: failed to remove duplicate {}: {}",
                            duplicate.display(),
                            e
                        ));
                    }
                    self.current = None;
                    self.state = CaptureState::Complete;
                    return Ok(false);
                }

                // The previous frame's final record came from a cell that
                // was only partially visible; this frame recaptures it
                // whole, so the partial record goes.
                let _ = self.accumulator.retract_last();
                self.state = CaptureState::Accumulating;
                Ok(true)
            }

            CaptureState::Accumulating => {
                let Some(frame) = self.current.take() else {
                    self.state = CaptureState::Error("no frame to accumulate".to_string());
                    return Ok(false);
                };

                let truncated = is_top_truncated(frame.gray(), self.config);
                let boundaries = find_boundaries(frame.gray(), true, self.config);
                let grays = gray_cells(frame.gray(), &boundaries);
                let colors = color_cells(frame.color(), &boundaries);
                let skip_first = truncated && self.frame_index > 1;

                crate::log(&format!(
                    "Screen {}: {} cells, truncated top: {}",
                    self.frame_index,
                    grays.len(),
                    truncated
                ));

                for (idx, (gray_cell, color_cell)) in grays.iter().zip(&colors).enumerate() {
                    if skip_first && idx == 0 {
                        crate::log(&format!(
                            "Screen {}: dropping truncated first cell",
                            self.frame_index
                        ));
                        continue;
                    }

                    let label = classify_cell(color_cell, self.config);
                    let ocr_input = if label.needs_inversion() {
                        invert_cell(gray_cell)
                    } else {
                        gray_cell.clone()
                    };

                    if let Err(e) = ocr_input.save(self.session.cell_image(self.frame_index, idx))
                    {
                        self.state =
                            CaptureState::Error(format!("Failed to save cell image: {}", e));
                        return Ok(false);
                    }
                    if let Err(e) =
                        color_cell.save(self.session.cell_color_image(self.frame_index, idx))
                    {
                        self.state =
                            CaptureState::Error(format!("Failed to save cell image: {}", e));
                        return Ok(false);
                    }

                    let raw = match self.reader.extract_text(&ocr_input) {
                        Ok(raw) => raw,
                        Err(e) => {
                            self.state =
                                CaptureState::Error(format!("Text extraction failed: {}", e));
                            return Ok(false);
                        }
                    };
                    let height = boundaries[idx + 1] - boundaries[idx];
                    self.accumulator.record(normalize_text(&raw), label, height);
                }

                self.boundaries = boundaries;
                self.current = Some(frame);
                self.state = CaptureState::Scrolling;
                Ok(true)
            }

            CaptureState::Scrolling => {
                let Some(frame) = self.current.take() else {
                    self.state = CaptureState::Error("no frame to scroll from".to_string());
                    return Ok(false);
                };

                let distance = plan_scroll(&self.boundaries, frame.height(), self.config);
                crate::log(&format!(
                    "Screen {}: scrolling by {} rows",
                    self.frame_index, distance
                ));

                if let Err(e) = self.device.swipe(
                    (self.config.swipe_column, distance),
                    (self.config.swipe_column, 0),
                    self.config.swipe_duration_ms,
                ) {
                    self.state = CaptureState::Error(format!("Swipe failed: {}", e));
                    return Ok(false);
                }
                if self.config.settle_delay_ms > 0 {
                    thread::sleep(Duration::from_millis(self.config.settle_delay_ms));
                }

                self.prev_gray = Some(frame.into_gray());
                self.frame_index += 1;
                self.state = CaptureState::Capturing;
                Ok(true)
            }

            CaptureState::Complete | CaptureState::Error(_) => Ok(false),
        }
    }

    /// Drives the state machine to completion and materializes the
    /// placeholder-filtered output.
    pub fn run(mut self) -> Result<Vec<CaptureRecord>> {
        while self.step()? {}

        match self.state {
            CaptureState::Complete => {
                crate::log(&format!(
                    "Screen capture complete: {} screens, {} records",
                    self.frame_index,
                    self.accumulator.len()
                ));
                Ok(self.accumulator.finalize())
            }
            CaptureState::Error(msg) => Err(anyhow!(msg)),
            state => Err(anyhow!("capture loop stopped in state {}", state)),
        }
    }
}
