use crate::geom::{bottom_neighbor, left_neighbor, right_neighbor, top_neighbor, Panel};

use super::context::RefineContext;
use super::gutters;

/// Stage 7: for each panel and each side, push that edge toward its neighbor
/// (leaving the page-wide minimum positive gutter as a gap) or, absent a
/// neighbor, snap to the extreme coordinate reached by any panel on that
/// side. A candidate coordinate is only ever applied when it enlarges the
/// panel — x/y may only decrease, right/bottom may only increase.
pub fn expand(mut panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !ctx.config.panel_expansion {
        return panels;
    }

    let gutters = gutters::collect(&panels);
    let gutter_x = gutters::min_positive(&gutters.x);
    let gutter_y = gutters::min_positive(&gutters.y);

    let n = panels.len();
    if n == 0 {
        return panels;
    }

    let extreme_x = panels.iter().map(|p| p.x).min().unwrap();
    let extreme_y = panels.iter().map(|p| p.y).min().unwrap();
    let extreme_right = panels.iter().map(|p| p.right).max().unwrap();
    let extreme_bottom = panels.iter().map(|p| p.bottom).max().unwrap();

    for i in 0..n {
        let new_x = match left_neighbor(&panels, i) {
            Some(j) => panels[j].right + gutter_x,
            None => extreme_x,
        };
        if new_x < panels[i].x {
            panels[i].x = new_x;
        }

        let new_y = match top_neighbor(&panels, i) {
            Some(j) => panels[j].bottom + gutter_y,
            None => extreme_y,
        };
        if new_y < panels[i].y {
            panels[i].y = new_y;
        }

        let new_right = match right_neighbor(&panels, i) {
            Some(j) => panels[j].x - gutter_x,
            None => extreme_right,
        };
        if new_right > panels[i].right {
            panels[i].right = new_right;
        }

        let new_bottom = match bottom_neighbor(&panels, i) {
            Some(j) => panels[j].y - gutter_y,
            None => extreme_bottom,
        };
        if new_bottom > panels[i].bottom {
            panels[i].bottom = new_bottom;
        }
    }

    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Segment;
    use crate::image_pipeline::PipelineConfig;
    use image::GrayImage;

    fn ctx(config: &PipelineConfig, segments: &[Segment], gray: &GrayImage) -> RefineContext<'_> {
        RefineContext {
            image_w: 800,
            image_h: 600,
            min_panel_ratio: 0.02,
            segments,
            gray,
            config,
        }
    }

    #[test]
    fn expansion_only_ever_enlarges_each_panel() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);

        let before = vec![
            Panel::from_rect(10, 10, 380, 290, 800, 600, 0.02),
            Panel::from_rect(420, 10, 790, 290, 800, 600, 0.02),
        ];
        let snapshot: Vec<(i64, i64, i64, i64)> = before.iter().map(|p| (p.x, p.y, p.right, p.bottom)).collect();

        let after = expand(before, &ctx(&config, &segments, &gray));

        for (p, (x, y, right, bottom)) in after.iter().zip(snapshot) {
            assert!(p.x <= x, "x grew: {} -> {}", x, p.x);
            assert!(p.y <= y, "y grew: {} -> {}", y, p.y);
            assert!(p.right >= right, "right shrank: {} -> {}", right, p.right);
            assert!(p.bottom >= bottom, "bottom shrank: {} -> {}", bottom, p.bottom);
        }
    }
}
