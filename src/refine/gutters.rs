use crate::geom::{left_neighbor, top_neighbor, Panel};

/// Per-axis gutter widths collected across a panel set (§4.4 "Gutter
/// collection"): `gutter_x = p.x - left_neighbor(p).right`, `gutter_y`
/// analogous on the vertical axis. Feeds both the expand stage's
/// signed-gutter snap and the confidence model's gutter-variance factor.
pub struct Gutters {
    pub x: Vec<i64>,
    pub y: Vec<i64>,
}

pub fn collect(panels: &[Panel]) -> Gutters {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for i in 0..panels.len() {
        if let Some(j) = left_neighbor(panels, i) {
            x.push(panels[i].x - panels[j].right);
        }
        if let Some(j) = top_neighbor(panels, i) {
            y.push(panels[i].y - panels[j].bottom);
        }
    }

    Gutters { x, y }
}

/// Smallest strictly positive value in `values`, or `0` if none.
pub fn min_positive(values: &[i64]) -> i64 {
    values.iter().copied().filter(|&v| v > 0).min().unwrap_or(0)
}
