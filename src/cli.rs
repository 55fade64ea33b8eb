//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scrollcap",
    about = "Scroll through a multi-screen device display, capturing cell text and colors",
    version
)]
pub struct Cli {
    /// Directory that receives the per-run session folder
    #[arg(short = 'o', long = "output", default_value = "output")]
    pub output_dir: PathBuf,

    /// JSON config file with crop bounds and thresholds
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Golden reference file to compare the captured report against
    #[arg(short = 'g', long = "golden")]
    pub golden: Option<PathBuf>,

    /// Serial of the device to drive (defaults to the first attached)
    #[arg(short = 's', long = "serial")]
    pub serial: Option<String>,

    /// Path to the adb binary (defaults to `adb` on PATH)
    #[arg(long = "adb")]
    pub adb_path: Option<String>,
}
