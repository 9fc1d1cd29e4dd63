use image::GrayImage;

use crate::geom::Panel;

use super::metric::{self, PanelMetric};

/// Sampling/page context a single panel's confidence is computed against.
pub struct PanelContext<'a> {
    pub page_w: i64,
    pub page_h: i64,
    pub gray: &'a GrayImage,
    pub edge_magnitude: &'a GrayImage,
}

/// A border edge is "bleed" when it lies within this many pixels of the
/// image border — such edges are excluded from color/gradient sampling
/// since there's no neighbor on the other side to contrast against.
const BLEED_MARGIN: i64 = 2;

enum Border {
    Left,
    Right,
    Top,
    Bottom,
}

fn is_bleed(panel: &Panel, ctx: &PanelContext, border: &Border) -> bool {
    match border {
        Border::Left => panel.x <= BLEED_MARGIN,
        Border::Right => panel.right >= ctx.page_w - BLEED_MARGIN,
        Border::Top => panel.y <= BLEED_MARGIN,
        Border::Bottom => panel.bottom >= ctx.page_h - BLEED_MARGIN,
    }
}

fn border_samples(panel: &Panel, ctx: &PanelContext, border: &Border, image: &GrayImage) -> Vec<f64> {
    let (w, h) = image.dimensions();
    let mut samples = Vec::new();

    let (fixed, range) = match border {
        Border::Left => (panel.x, panel.y..panel.bottom),
        Border::Right => (panel.right.saturating_sub(1), panel.y..panel.bottom),
        Border::Top => (panel.y, panel.x..panel.right),
        Border::Bottom => (panel.bottom.saturating_sub(1), panel.x..panel.right),
    };

    for t in range.step_by(4.max(1)) {
        let (x, y) = match border {
            Border::Left | Border::Right => (fixed, t),
            Border::Top | Border::Bottom => (t, fixed),
        };
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            continue;
        }
        samples.push(image.get_pixel(x as u32, y as u32)[0] as f64);
    }

    samples
}

fn variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

const BORDERS: [Border; 4] = [Border::Left, Border::Right, Border::Top, Border::Bottom];

/// Per-panel confidence: weighted mean of present components (§4.5). Gutter
/// quality needs the full panel slice to find neighbors; color variance and
/// edge strength need the grayscale/gradient images and skip bleed edges.
pub fn score(panel: &Panel, index: usize, panels: &[Panel], ctx: &PanelContext) -> f64 {
    let mut parts: Vec<(PanelMetric, f64)> = Vec::new();

    parts.push((PanelMetric::AspectRatio, metric::aspect_ratio_score(panel.width() as f64, panel.height() as f64)));

    let page_area = (ctx.page_w as f64) * (ctx.page_h as f64);
    parts.push((PanelMetric::Size, metric::size_score(panel.area(), page_area)));

    let rectangularity = match panel.polygon() {
        Some(poly) => metric::rectangularity_score(polygon_area(poly), panel.area()),
        None => 0.9,
    };
    parts.push((PanelMetric::Rectangularity, rectangularity));

    if let Some(gutter_quality) = gutter_quality_score(panel, index, panels, ctx) {
        parts.push((PanelMetric::GutterQuality, gutter_quality));
    }

    let non_bleed: Vec<&Border> = BORDERS.iter().filter(|b| !is_bleed(panel, ctx, b)).collect();

    if !non_bleed.is_empty() {
        let color_samples: Vec<f64> = non_bleed.iter().flat_map(|b| border_samples(panel, ctx, b, ctx.gray)).collect();
        if color_samples.len() >= 2 {
            parts.push((PanelMetric::GutterColorVariance, metric::gutter_color_variance_score(variance(&color_samples))));
        }

        let edge_samples: Vec<f64> = non_bleed.iter().flat_map(|b| border_samples(panel, ctx, b, ctx.edge_magnitude)).collect();
        if !edge_samples.is_empty() {
            parts.push((PanelMetric::EdgeStrength, metric::edge_strength_score(mean(&edge_samples))));
        }
    }

    if let Some(coverage) = panel.split_coverage {
        parts.push((PanelMetric::SplitCoverage, coverage.clamp(0.0, 1.0)));
    }

    // Mirrors the teacher's `Objective::compute`: the denominator is the sum
    // of every configured metric's weight, not just the ones that happened
    // to be measurable for this panel. A panel missing its heaviest-weighted
    // components (gutter quality, color variance, edge strength — usually
    // because it has no neighbors or is all-bleed) is weak evidence and its
    // score should reflect that, not be renormalized away.
    let total_weight: f64 = ALL_METRICS.iter().map(|m| m.weight()).sum();
    parts.iter().map(|(m, s)| m.weight() * s).sum::<f64>() / total_weight
}

const ALL_METRICS: [PanelMetric; 7] = [
    PanelMetric::AspectRatio,
    PanelMetric::Size,
    PanelMetric::Rectangularity,
    PanelMetric::GutterQuality,
    PanelMetric::GutterColorVariance,
    PanelMetric::EdgeStrength,
    PanelMetric::SplitCoverage,
];

fn gutter_quality_score(panel: &Panel, index: usize, panels: &[Panel], ctx: &PanelContext) -> Option<f64> {
    use crate::geom::{bottom_neighbor, left_neighbor, right_neighbor, top_neighbor};

    let mut gaps: Vec<(f64, f64)> = Vec::new();
    if let Some(j) = left_neighbor(panels, index) {
        gaps.push(((panel.x - panels[j].right) as f64, ctx.page_w as f64));
    }
    if let Some(j) = right_neighbor(panels, index) {
        gaps.push(((panels[j].x - panel.right) as f64, ctx.page_w as f64));
    }
    if let Some(j) = top_neighbor(panels, index) {
        gaps.push(((panel.y - panels[j].bottom) as f64, ctx.page_h as f64));
    }
    if let Some(j) = bottom_neighbor(panels, index) {
        gaps.push(((panels[j].y - panel.bottom) as f64, ctx.page_h as f64));
    }

    if gaps.is_empty() {
        return None;
    }
    let scores: Vec<f64> = gaps.iter().map(|&(gap, dim)| metric::gap_score(gap, dim)).collect();
    Some(mean(&scores))
}

fn polygon_area(poly: &[crate::geom::Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        sum += (a.x * b.y - b.x * a.y) as f64;
    }
    (sum / 2.0).abs()
}
