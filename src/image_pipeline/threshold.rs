use image::GrayImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Otsu binary threshold, matching §4.3's "threshold with Otsu" step.
pub fn otsu_binarize(image: &GrayImage) -> GrayImage {
    let level = otsu_level(image);
    threshold(image, level, ThresholdType::Binary)
}
