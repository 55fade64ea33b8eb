//! Android device access through the `adb` command-line tool.
//!
//! Screenshots come from `adb exec-out screencap -p` (PNG on stdout),
//! swipes from `adb shell input swipe`. Device failures are fatal to a
//! run: a skipped frame would break the strict ordering the accumulator
//! depends on, so there is no retry here.

use anyhow::{anyhow, ensure, Context, Result};
use image::RgbImage;
use regex::Regex;
use std::process::{Command, Output};

use super::Device;

/// An attached Android device driven through the `adb` binary.
pub struct AdbDevice {
    adb_path: String,
    serial: String,
}

impl AdbDevice {
    /// Connects to an attached device.
    ///
    /// Enumerates `adb devices` output and picks the requested serial, or
    /// the first attached device when none is given. Fails fast when adb
    /// is missing or no device is in the `device` state.
    pub fn connect(adb_path: Option<&str>, serial: Option<&str>) -> Result<AdbDevice> {
        let adb_path = adb_path.unwrap_or("adb").to_string();

        let output = Command::new(&adb_path)
            .arg("devices")
            .output()
            .with_context(|| format!("failed to run '{} devices'; is adb installed?", adb_path))?;
        ensure!(
            output.status.success(),
            "'{} devices' failed: {}",
            adb_path,
            String::from_utf8_lossy(&output.stderr)
        );

        let listing = String::from_utf8_lossy(&output.stdout);
        let attached = parse_device_list(&listing)?;

        let serial = match serial {
            Some(wanted) => {
                ensure!(
                    attached.iter().any(|s| s == wanted),
                    "device '{}' is not attached (attached: {:?})",
                    wanted,
                    attached
                );
                wanted.to_string()
            }
            None => attached
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("no device attached"))?,
        };

        crate::log(&format!("Using device {}", serial));
        Ok(AdbDevice { adb_path, serial })
    }

    fn run_adb(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new(&self.adb_path)
            .args(["-s", &self.serial])
            .args(args)
            .output()
            .with_context(|| format!("failed to run adb {}", args.join(" ")))?;
        ensure!(
            output.status.success(),
            "adb {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(output)
    }
}

impl Device for AdbDevice {
    fn capture_frame(&mut self) -> Result<RgbImage> {
        let output = self.run_adb(&["exec-out", "screencap", "-p"])?;
        let img = image::load_from_memory(&output.stdout)
            .context("device returned an unreadable screenshot")?;
        Ok(img.to_rgb8())
    }

    fn swipe(&mut self, from: (u32, u32), to: (u32, u32), duration_ms: u64) -> Result<()> {
        let (x1, y1) = from;
        let (x2, y2) = to;
        self.run_adb(&[
            "shell",
            "input",
            "swipe",
            &x1.to_string(),
            &y1.to_string(),
            &x2.to_string(),
            &y2.to_string(),
            &duration_ms.to_string(),
        ])?;
        Ok(())
    }
}

/// Extracts the serials of attached devices from `adb devices` output.
/// Devices in other states (offline, unauthorized) are skipped.
fn parse_device_list(listing: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(r"(?m)^(\S+)\s+device\s*$")?;
    Ok(pattern
        .captures_iter(listing)
        .map(|caps| caps[1].to_string())
        .collect())
}
