//! Report rendering and golden-reference comparison.
//!
//! The report is the run's externally visible result: one line per
//! captured cell with its text, color label, and height. A golden
//! reference file, when given, turns a run into a regression test against
//! a previous known-good capture.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::capture::CaptureRecord;

/// Writes the finalized records, one `text COLOR height` line each.
pub fn write_report(records: &[CaptureRecord], path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;

    for record in records {
        writeln!(file, "{} {} {}", record.text, record.color, record.height)
            .context("failed to write report line")?;
    }

    Ok(())
}

/// Compares the rendered report against a golden reference, line by line.
///
/// Logs PASS or FAIL plus each differing line pair, and returns whether
/// the files matched exactly.
pub fn compare_golden(report: &Path, golden: &Path) -> Result<bool> {
    let expected = fs::read_to_string(golden)
        .with_context(|| format!("failed to read golden reference {}", golden.display()))?;
    let actual = fs::read_to_string(report)
        .with_context(|| format!("failed to read report {}", report.display()))?;

    if expected == actual {
        crate::log("Golden comparison: PASS");
        return Ok(true);
    }

    crate::log("Golden comparison: FAIL");
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let count = expected_lines.len().max(actual_lines.len());

    for i in 0..count {
        let want = expected_lines.get(i).copied().unwrap_or("<missing>");
        let got = actual_lines.get(i).copied().unwrap_or("<missing>");
        if want != got {
            crate::log(&format!("  line {}: expected '{}', got '{}'", i + 1, want, got));
        }
    }

    Ok(false)
}
