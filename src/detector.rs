//! The detector facade (§4.7): orchestrates pre-resize, the image pipeline,
//! panel refinement, confidence scoring, and coordinate rescaling for a
//! single page, grounded on the teacher's `partition::algorithm` top-level
//! orchestration layer calling into staged sub-algorithms.

use std::time::Instant;

use image::RgbImage;
use tracing::{debug, info};

use crate::confidence;
use crate::geom::Panel;
use crate::image_pipeline::{self, PipelineConfig};
use crate::order::{self, Direction};
use crate::refine::{self, RefineContext};

/// Knobs for a single `Detector::detect` call, layered on top of `PipelineConfig`.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub pipeline: PipelineConfig,
    /// Downscale so `max(W, H) <= max_dimension` before processing, rescaling
    /// results back afterward. `None` disables pre-resize.
    pub max_dimension: Option<u32>,
    /// Reading direction used by the ordering solver.
    pub direction: Direction,
    /// Skip confidence scoring entirely, assigning 1.0 to every panel and the page.
    pub skip_scoring: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            max_dimension: Some(1600),
            direction: Direction::Ltr,
            skip_scoring: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputPanel {
    pub bbox: (i64, i64, i64, i64),
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub panels: Vec<OutputPanel>,
    pub order: Vec<usize>,
    pub confidence: f64,
    pub gutters: Option<(i64, i64)>,
    pub processing_time: f64,
}

pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> crate::error::Result<Self> {
        config.pipeline.validate()?;
        Ok(Self { config })
    }

    pub fn detect(&self, image: &RgbImage) -> DetectionResult {
        let start = Instant::now();
        let (orig_w, orig_h) = image.dimensions();

        let scale = self.resize_scale(orig_w, orig_h);
        let working = if scale < 1.0 {
            let new_w = ((orig_w as f64) * scale).round().max(1.0) as u32;
            let new_h = ((orig_h as f64) * scale).round().max(1.0) as u32;
            image::imageops::resize(image, new_w, new_h, image::imageops::FilterType::Lanczos3)
        } else {
            image.clone()
        };

        debug!(orig_w, orig_h, scale, "detector: preprocessing page");

        let output = image_pipeline::run(&working, &self.config.pipeline);
        let (work_w, work_h) = working.dimensions();

        let ctx = RefineContext {
            image_w: work_w as i64,
            image_h: work_h as i64,
            min_panel_ratio: self.config.pipeline.min_panel_ratio,
            segments: &output.segments,
            gray: &output.gray,
            config: &self.config.pipeline,
        };
        let panels = refine::run(output.contours, &ctx);

        let (panel_scores, page_confidence) = if self.config.skip_scoring {
            (vec![1.0; panels.len()], 1.0)
        } else {
            let scored = confidence::score_page(&panels, work_w as i64, work_h as i64, &output.gray, &output.edge_magnitude);
            (scored.panel_scores, scored.page_score)
        };

        let order = order::solve(&panels, self.config.direction);

        let gutters = refine::collect_gutters(&panels);
        let gutter_pair = if gutters.x.is_empty() && gutters.y.is_empty() {
            None
        } else {
            Some((min_or_zero(&gutters.x), min_or_zero(&gutters.y)))
        };

        let inverse_scale = if scale > 0.0 { 1.0 / scale } else { 1.0 };
        let output_panels = panels
            .iter()
            .map(|p| rescale_panel(p, inverse_scale, orig_w, orig_h))
            .zip(panel_scores)
            .map(|(bbox, confidence)| OutputPanel { bbox, confidence })
            .collect();

        let elapsed = start.elapsed().as_secs_f64();
        info!(panels = panels.len(), confidence = page_confidence, elapsed, "detector: page complete");

        DetectionResult {
            panels: output_panels,
            order,
            confidence: page_confidence,
            gutters: gutter_pair,
            processing_time: elapsed,
        }
    }

    fn resize_scale(&self, w: u32, h: u32) -> f64 {
        match self.config.max_dimension {
            Some(max_dim) if max_dim > 0 => {
                let longest = w.max(h) as f64;
                if longest <= max_dim as f64 {
                    1.0
                } else {
                    max_dim as f64 / longest
                }
            }
            _ => 1.0,
        }
    }
}

fn min_or_zero(values: &[i64]) -> i64 {
    values.iter().copied().filter(|&v| v > 0).min().unwrap_or(0)
}

/// Rescales a working-resolution panel back into the original image's
/// coordinates, clamping into `[0, W) x [0, H)` with width/height >= 1.
fn rescale_panel(panel: &Panel, inverse_scale: f64, orig_w: u32, orig_h: u32) -> (i64, i64, i64, i64) {
    let x = ((panel.x as f64) * inverse_scale).round() as i64;
    let y = ((panel.y as f64) * inverse_scale).round() as i64;
    let right = ((panel.right as f64) * inverse_scale).round() as i64;
    let bottom = ((panel.bottom as f64) * inverse_scale).round() as i64;

    let max_x = (orig_w as i64 - 1).max(0);
    let max_y = (orig_h as i64 - 1).max(0);

    let x = x.clamp(0, max_x);
    let y = y.clamp(0, max_y);
    let right = (right.clamp(0, orig_w as i64)).max(x + 1);
    let bottom = (bottom.clamp(0, orig_h as i64)).max(y + 1);

    (x, y, right, bottom)
}
