//! The image pipeline (§4.3): grayscale/denoise, edge extraction,
//! thresholding, contour extraction, and line-segment detection.

mod config;
mod contours;
mod edges;
mod lines;
mod preprocess;
mod threshold;

pub use config::PipelineConfig;

use image::{GrayImage, RgbImage};

use crate::geom::{Point, Segment};

pub struct PipelineOutput {
    pub contours: Vec<Vec<Point>>,
    pub segments: Vec<Segment>,
    pub edge_magnitude: GrayImage,
    pub gray: GrayImage,
}

pub fn run(image: &RgbImage, config: &PipelineConfig) -> PipelineOutput {
    let gray = preprocess::to_grayscale(image, config.use_denoising);
    let edge_magnitude = edges::sobel_edges(&gray);

    let edge_image = edges::detect_edges(&gray, config.use_canny, config.use_morphological_close);
    let binary = threshold::otsu_binarize(&edge_image);
    let raw_contours = contours::extract_contours(&binary);

    let need_polygons = config.panel_splitting || config.big_panel_grouping;
    let contours = raw_contours
        .into_iter()
        .map(|c| if need_polygons { contours::approximate_polygon(&c) } else { c })
        .collect();

    let (w, h) = gray.dimensions();
    let min_dim = w.min(h) as f64;
    let raw_segments = lines::detect_segments(&edge_image, config.min_segment_ratio);

    let scored: Vec<(Segment, f64)> = raw_segments
        .into_iter()
        .map(|s| {
            let score = lines::score_segment(&s, min_dim, config.prefer_axis_aligned);
            (s, score)
        })
        .collect();
    let segments = lines::top_k_by_score(scored, config.max_segments);

    PipelineOutput {
        contours,
        segments,
        edge_magnitude,
        gray,
    }
}
