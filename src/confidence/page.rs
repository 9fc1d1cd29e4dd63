use crate::geom::Panel;
use crate::refine::Gutters;

/// Page confidence = geometric mean (4th root) of four factors (§4.5).
pub fn score(panels: &[Panel], panel_scores: &[f64], page_w: i64, page_h: i64, gutters: &Gutters) -> f64 {
    let weighted_conf = weighted_conf(panels, panel_scores);
    let count = count_factor(panels.len());
    let coverage = coverage_factor(panels, page_w, page_h);
    let gutter_variance = gutter_variance_factor(gutters);

    (weighted_conf * count * coverage * gutter_variance).max(0.0).sqrt().sqrt()
}

fn weighted_conf(panels: &[Panel], panel_scores: &[f64]) -> f64 {
    let total_area: f64 = panels.iter().map(Panel::area).sum();
    if total_area <= 0.0 {
        return panel_scores.iter().copied().sum::<f64>() / (panel_scores.len().max(1) as f64);
    }
    panels
        .iter()
        .zip(panel_scores)
        .map(|(p, &s)| p.area() * s)
        .sum::<f64>()
        / total_area
}

fn count_factor(n: usize) -> f64 {
    match n {
        0 => 0.1,
        1 => 0.7,
        2..=12 => 1.0,
        _ => 0.5,
    }
}

fn coverage_factor(panels: &[Panel], page_w: i64, page_h: i64) -> f64 {
    let page_area = (page_w as f64) * (page_h as f64);
    if page_area <= 0.0 {
        return 0.4;
    }
    let covered: f64 = panels.iter().map(Panel::area).sum();
    let ratio = covered / page_area;

    if (0.70..=0.95).contains(&ratio) {
        1.0
    } else if ratio < 0.70 {
        (0.4 + 0.6 * (ratio / 0.70)).clamp(0.4, 1.0)
    } else {
        (1.0 - 0.2 * ((ratio - 0.95) / 0.05).min(1.0)).max(0.8)
    }
}

fn gutter_variance_factor(gutters: &Gutters) -> f64 {
    let positive: Vec<f64> = gutters
        .x
        .iter()
        .chain(gutters.y.iter())
        .copied()
        .filter(|&g| g > 0)
        .map(|g| g as f64)
        .collect();

    let total = gutters.x.len() + gutters.y.len();
    if total == 0 {
        return 0.85;
    }
    if positive.len() * 2 < total {
        return 0.7;
    }
    if positive.len() < 2 {
        return 0.85;
    }

    let mean = positive.iter().sum::<f64>() / positive.len() as f64;
    if mean <= 0.0 {
        return 0.7;
    }
    let variance = positive.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / positive.len() as f64;
    let cv = variance.sqrt() / mean;

    if cv < 0.3 {
        1.0
    } else if cv < 0.6 {
        0.7
    } else {
        (0.7 * 0.6 / cv).max(0.4)
    }
}
