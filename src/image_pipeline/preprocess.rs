use image::{GrayImage, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Converts to grayscale and optionally applies a light Gaussian blur before
/// edge detection (§4.3 "Steps").
pub fn to_grayscale(image: &RgbImage, denoise: bool) -> GrayImage {
    let gray = image::DynamicImage::ImageRgb8(image.clone()).to_luma8();
    if denoise {
        gaussian_blur_f32(&gray, 1.0)
    } else {
        gray
    }
}
