pub mod accumulator;
pub mod planner;
pub mod runner;

pub use accumulator::{Accumulator, CaptureRecord};
pub use planner::plan_scroll;
pub use runner::{CaptureRun, CaptureState};
