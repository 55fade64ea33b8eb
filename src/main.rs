//! scrollcap
//!
//! Drives a scrollable multi-screen device display through adb, capturing
//! each screen, segmenting it into uniform-color cells, reading each
//! cell's text with Tesseract, and accumulating a duplicate-free report
//! of everything the display contains.

mod capture;
mod cli;
mod config;
mod device;
mod ocr;
mod paths;
mod report;
mod vision;

use anyhow::{ensure, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use capture::CaptureRun;
use device::AdbDevice;
use ocr::TesseractReader;
use paths::SessionPaths;

/// Per-session log file, set once the session directory exists.
static SESSION_LOG: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Activates or deactivates logging to a session file.
pub fn set_session_log(path: Option<PathBuf>) {
    if let Ok(mut log_path) = SESSION_LOG.lock() {
        *log_path = path;
    }
}

/// Logs a message to the console and, when active, the session log file,
/// with a timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    if let Ok(log_path) = SESSION_LOG.lock() {
        if let Some(path) = log_path.as_ref() {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }
}

fn main() -> Result<()> {
    // Panics should land in the session log too, not just stderr.
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let args = cli::Cli::parse();

    let config = config::load_config(args.config.as_deref());
    config.validate()?;

    let session = SessionPaths::create(&args.output_dir)?;
    set_session_log(Some(session.log_file()));
    log(&format!("Session folder: {}", session.root().display()));

    let device = AdbDevice::connect(args.adb_path.as_deref(), args.serial.as_deref())?;
    let reader = TesseractReader::new()?;

    let records = CaptureRun::new(device, reader, &config, &session).run()?;

    let report_path = session.report_file();
    report::write_report(&records, &report_path)?;
    log(&format!(
        "Report written: {} records -> {}",
        records.len(),
        report_path.display()
    ));

    if let Some(golden) = &args.golden {
        ensure!(
            report::compare_golden(&report_path, golden)?,
            "captured report does not match the golden reference"
        );
    }

    set_session_log(None);
    Ok(())
}
