//! Tesseract run as an external process.
//!
//! The cell image is handed over through a temporary PNG and the
//! recognized text read back from stdout. `--psm 6` treats the cell as a
//! single uniform block of text, which matches how the inspection UI lays
//! out its rows.

use anyhow::{anyhow, Result};
use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::TextReader;

/// Environment variable overriding where the tesseract executable lives.
const TESSERACT_ENV: &str = "SCROLLCAP_TESSERACT";

/// OCR through a locally installed Tesseract.
pub struct TesseractReader {
    executable: PathBuf,
}

impl TesseractReader {
    /// Locates Tesseract and verifies it runs.
    ///
    /// Checks the `SCROLLCAP_TESSERACT` override first, then falls back
    /// to `tesseract` on PATH. Missing Tesseract is a startup error, not
    /// something to discover mid-run.
    pub fn new() -> Result<TesseractReader> {
        let executable = find_tesseract_executable()?;
        crate::log(&format!("Tesseract found at: {}", executable.display()));
        Ok(TesseractReader { executable })
    }
}

fn find_tesseract_executable() -> Result<PathBuf> {
    let candidate = match std::env::var(TESSERACT_ENV) {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("tesseract"),
    };

    match Command::new(&candidate).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(candidate),
        Ok(output) => Err(anyhow!(
            "{} --version failed: {}",
            candidate.display(),
            String::from_utf8_lossy(&output.stderr)
        )),
        Err(e) => Err(anyhow!(
            "tesseract not found ({}); install it or set {}",
            e,
            TESSERACT_ENV
        )),
    }
}

impl TextReader for TesseractReader {
    fn extract_text(&self, img: &GrayImage) -> Result<String> {
        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        let output = Command::new(&self.executable)
            .arg(temp_input.path())
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .arg("--psm")
            .arg("6")
            .arg("quiet")
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
