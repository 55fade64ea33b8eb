pub mod color;
pub mod frame;
pub mod segment;
pub mod similarity;
pub mod truncation;

pub use color::{classify_cell, ColorLabel};
pub use frame::Frame;
pub use segment::{color_cells, find_boundaries, gray_cells};
pub use similarity::{frames_similar, pixel_difference_count};
pub use truncation::is_top_truncated;
