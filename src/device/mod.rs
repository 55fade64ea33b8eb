//! Device collaborator interface.
//!
//! The capture loop only needs two things from the device: a screenshot of
//! whatever is currently visible, and a swipe gesture to move the scroll
//! position. Everything about how those reach the hardware lives behind
//! this trait; the loop is tested against fakes.

pub mod adb;

pub use adb::AdbDevice;

use anyhow::Result;
use image::RgbImage;

/// A device whose screen can be captured and scrolled.
///
/// Callable repeatedly with no setup between calls other than letting the
/// commanded swipe settle.
pub trait Device {
    /// Captures the full current screen as a color bitmap.
    fn capture_frame(&mut self) -> Result<RgbImage>;

    /// Issues a swipe gesture from `from` to `to` over `duration_ms`.
    fn swipe(&mut self, from: (u32, u32), to: (u32, u32), duration_ms: u64) -> Result<()>;
}
