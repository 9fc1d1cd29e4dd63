use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use imageproc::morphology::{close, Norm};

/// Weighted `|dx| + |dy|` Sobel magnitude, normalized to 8-bit.
pub fn sobel_edges(gray: &GrayImage) -> GrayImage {
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    let (w, h) = gray.dimensions();
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mag = gx.get_pixel(x, y)[0].unsigned_abs() as u32 + gy.get_pixel(x, y)[0].unsigned_abs() as u32;
            out.put_pixel(x, y, image::Luma([mag.min(255) as u8]));
        }
    }
    out
}

/// Canny edge detector with fixed low/high thresholds tuned for line art.
pub fn canny_edges(gray: &GrayImage) -> GrayImage {
    canny(gray, 40.0, 100.0)
}

pub fn morphological_close(edges: &GrayImage) -> GrayImage {
    close(edges, Norm::LInf, 1)
}

pub fn detect_edges(gray: &GrayImage, use_canny: bool, close_gaps: bool) -> GrayImage {
    let edges = if use_canny { canny_edges(gray) } else { sobel_edges(gray) };
    if close_gaps {
        morphological_close(&edges)
    } else {
        edges
    }
}
