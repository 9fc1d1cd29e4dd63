use image::GrayImage;

use crate::geom::Segment;
use crate::image_pipeline::PipelineConfig;

/// Immutable, page-wide context threaded through every refinement stage, so
/// image size and the min-panel ratio aren't carried per-panel the way the
/// original implementation did (see SPEC_FULL.md §9).
pub struct RefineContext<'a> {
    pub image_w: i64,
    pub image_h: i64,
    pub min_panel_ratio: f64,
    pub segments: &'a [Segment],
    pub gray: &'a GrayImage,
    pub config: &'a PipelineConfig,
}
