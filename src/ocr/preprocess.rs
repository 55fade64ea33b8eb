//! Cell image preparation ahead of OCR.

use image::GrayImage;

/// Inverts a grayscale cell image.
///
/// Tesseract copes poorly with light text on the red and navy cell
/// backgrounds; inverting turns those into dark-on-light before
/// recognition.
pub fn invert_cell(img: &GrayImage) -> GrayImage {
    let mut out = img.clone();
    image::imageops::invert(&mut out);
    out
}
