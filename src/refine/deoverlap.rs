use crate::geom::Panel;

use super::context::RefineContext;

/// Stage 6: for each pair with a non-empty overlap rect, shrink exactly one
/// edge to eliminate it — the taller-than-wide overlap shrinks the x edges,
/// the wider-than-tall overlap shrinks the y edges. Runs to a fixed point
/// since resolving one pair can create or reveal another.
pub fn deoverlap(mut panels: Vec<Panel>, _ctx: &RefineContext) -> Vec<Panel> {
    const MAX_PASSES: usize = 200;

    for _ in 0..MAX_PASSES {
        let mut changed = false;
        let n = panels.len();

        'pairs: for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let Some(rect) = panels[i].overlap_rect(&panels[j]) else {
                    continue;
                };

                let overlap_w = rect.right - rect.x;
                let overlap_h = rect.bottom - rect.y;

                if overlap_h > overlap_w {
                    if panels[i].right == rect.right {
                        panels[i].right = rect.x;
                        panels[j].x = rect.right;
                        changed = true;
                        break 'pairs;
                    } else if panels[j].right == rect.right {
                        panels[j].right = rect.x;
                        panels[i].x = rect.right;
                        changed = true;
                        break 'pairs;
                    }
                } else if panels[i].bottom == rect.bottom {
                    panels[i].bottom = rect.y;
                    panels[j].y = rect.bottom;
                    changed = true;
                    break 'pairs;
                } else if panels[j].bottom == rect.bottom {
                    panels[j].bottom = rect.y;
                    panels[i].y = rect.bottom;
                    changed = true;
                    break 'pairs;
                }
            }
        }

        if !changed {
            break;
        }
    }

    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Panel;
    use crate::image_pipeline::PipelineConfig;
    use image::GrayImage;

    #[test]
    fn overlapping_panels_no_longer_overlap_after_deoverlap() {
        let a = Panel::from_rect(0, 0, 150, 100, 800, 600, 0.02);
        let b = Panel::from_rect(100, 0, 250, 100, 800, 600, 0.02);
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
        let result = deoverlap(vec![a, b], &ctx);
        assert!(!result[0].overlaps(&result[1]));
    }
}
