use crate::geom::{Panel, Segment};

use super::context::RefineContext;

fn axis_aligned_within_15(seg: &Segment) -> bool {
    let angle_deg = (seg.dy().abs() as f64).atan2(seg.dx().abs() as f64).to_degrees();
    angle_deg.min(90.0 - angle_deg) <= 15.0
}

fn blocked_by_interior_segment(candidate: &Panel, segments: &[Segment]) -> bool {
    let threshold = candidate.diagonal() / 5.0;
    segments
        .iter()
        .filter(|s| candidate.contains_segment(s))
        .filter(|s| axis_aligned_within_15(s))
        .any(|s| s.length() > threshold)
}

/// Stage 9: repeatedly merge pairs of panels (bbox union via `group_with`)
/// when the merged bbox doesn't bump into any other panel and doesn't swallow
/// an axis-aligned drawn line long enough to be a real gutter — i.e. the pair
/// really is one panel that got fragmented, not two panels separated by a
/// gutter the contour pass missed. Runs to a fixed point.
pub fn group_big(mut panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !ctx.config.big_panel_grouping {
        return panels;
    }

    loop {
        let n = panels.len();
        let mut accepted = None;

        'search: for i in 0..n {
            for j in (i + 1)..n {
                let candidate = panels[i].group_with(&panels[j]);

                let others: Vec<&Panel> = panels
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, p)| p)
                    .collect();

                if candidate.bumps_into(&others) {
                    continue;
                }
                if blocked_by_interior_segment(&candidate, ctx.segments) {
                    continue;
                }

                accepted = Some((i, j, candidate));
                break 'search;
            }
        }

        let Some((i, j, candidate)) = accepted else {
            break;
        };

        panels.remove(j);
        panels.remove(i);
        panels.push(candidate);
    }

    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::PipelineConfig;
    use image::GrayImage;

    #[test]
    fn adjacent_panels_with_no_blocking_gutter_merge() {
        let a = Panel::from_rect(0, 0, 100, 100, 800, 600, 0.02);
        let b = Panel::from_rect(100, 0, 200, 100, 800, 600, 0.02);
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);
        let ctx = RefineContext {
            image_w: 800,
            image_h: 600,
            min_panel_ratio: 0.02,
            segments: &segments,
            gray: &gray,
            config: &config,
        };
        let result = group_big(vec![a, b], &ctx);
        assert_eq!(result.len(), 1);
        assert_eq!((result[0].x, result[0].y, result[0].right, result[0].bottom), (0, 0, 200, 100));
    }

    #[test]
    fn a_real_gutter_line_blocks_the_merge() {
        let a = Panel::from_rect(0, 0, 100, 100, 800, 600, 0.02);
        let b = Panel::from_rect(100, 0, 200, 100, 800, 600, 0.02);
        let gutter = Segment::new(crate::geom::Point::new(100, 0), crate::geom::Point::new(100, 100));
        let config = PipelineConfig::default();
        let segments = vec![gutter];
        let gray = GrayImage::new(800, 600);
        let ctx = RefineContext {
            image_w: 800,
            image_h: 600,
            min_panel_ratio: 0.02,
            segments: &segments,
            gray: &gray,
            config: &config,
        };
        let result = group_big(vec![a, b], &ctx);
        assert_eq!(result.len(), 2);
    }
}
