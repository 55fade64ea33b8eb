//! Per-run session directory layout.
//!
//! Every run writes into its own timestamped folder under the chosen
//! output directory: frame and cell images under `images/`, the session
//! log under `logs/`, and the final report at the session root.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of one capture session.
pub struct SessionPaths {
    root: PathBuf,
    images: PathBuf,
    logs: PathBuf,
}

impl SessionPaths {
    /// Creates `<base>/<YYYYMMDD_HHMMSS>/` with its `images/` and `logs/`
    /// subdirectories.
    pub fn create(base: &Path) -> Result<SessionPaths> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let root = base.join(timestamp);
        let images = root.join("images");
        let logs = root.join("logs");

        fs::create_dir_all(&images)
            .with_context(|| format!("failed to create {}", images.display()))?;
        fs::create_dir_all(&logs)
            .with_context(|| format!("failed to create {}", logs.display()))?;

        Ok(SessionPaths { root, images, logs })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full screenshot of frame `index`.
    pub fn frame_image(&self, index: u32) -> PathBuf {
        self.images.join(format!("frame{:03}.png", index))
    }

    /// Grayscale sub-image of one cell, as handed to OCR.
    pub fn cell_image(&self, frame: u32, cell: usize) -> PathBuf {
        self.images.join(format!("frame{:03}_cell{}.png", frame, cell))
    }

    /// Color sub-image of one cell.
    pub fn cell_color_image(&self, frame: u32, cell: usize) -> PathBuf {
        self.images
            .join(format!("frame{:03}_cell{}_color.png", frame, cell))
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs.join("session.log")
    }

    pub fn report_file(&self) -> PathBuf {
        self.root.join("screen_capture.txt")
    }
}
