//! Confidence scoring (§4.5): per-panel weighted heuristics, aggregated into
//! a single page-level score by geometric mean. Structurally grounded on the
//! teacher's `Objective`/`Metric` weighted-scalarization pattern.

mod metric;
mod page;
mod panel;

pub use metric::PanelMetric;
pub use panel::PanelContext;

use image::GrayImage;

use crate::geom::Panel;
use crate::refine;

pub struct PageConfidence {
    pub panel_scores: Vec<f64>,
    pub page_score: f64,
}

pub fn score_page(panels: &[Panel], page_w: i64, page_h: i64, gray: &GrayImage, edge_magnitude: &GrayImage) -> PageConfidence {
    let ctx = PanelContext { page_w, page_h, gray, edge_magnitude };

    let panel_scores: Vec<f64> = panels
        .iter()
        .enumerate()
        .map(|(i, p)| panel::score(p, i, panels, &ctx))
        .collect();

    let gutters = refine::collect_gutters(panels);
    let page_score = page::score(panels, &panel_scores, page_w, page_h, &gutters);

    PageConfidence { panel_scores, page_score }
}
