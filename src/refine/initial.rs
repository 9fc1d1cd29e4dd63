use crate::geom::{Panel, Point};

use super::context::RefineContext;

fn bounding_rect(points: &[Point]) -> (i64, i64, i64, i64) {
    let xs = points.iter().map(|p| p.x);
    let ys = points.iter().map(|p| p.y);
    (
        xs.clone().min().unwrap_or(0),
        ys.clone().min().unwrap_or(0),
        xs.max().unwrap_or(0),
        ys.max().unwrap_or(0),
    )
}

/// Stage 1: build the initial working set from the pipeline's contours,
/// dropping anything that's very small. Polygon data is only kept when a
/// later stage consumes it (splitting or big-panel grouping).
pub fn construct(contours: Vec<Vec<crate::geom::Point>>, ctx: &RefineContext) -> Vec<Panel> {
    let need_polygons = ctx.config.panel_splitting || ctx.config.big_panel_grouping;

    contours
        .into_iter()
        .filter_map(|contour| {
            if contour.len() < 3 {
                return None;
            }
            let panel = if need_polygons {
                Panel::from_polygon(contour, ctx.image_w, ctx.image_h, ctx.min_panel_ratio)
            } else {
                let (x, y, right, bottom) = bounding_rect(&contour);
                Panel::from_rect(x, y, right, bottom, ctx.image_w, ctx.image_h, ctx.min_panel_ratio)
            };
            if panel.is_very_small() {
                None
            } else {
                Some(panel)
            }
        })
        .collect()
}
