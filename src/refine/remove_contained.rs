use crate::geom::Panel;

use super::context::RefineContext;

/// Stage 10: when one panel sits >= 90% inside another, drop the larger one
/// — it's typically a false outer frame the earlier stages failed to split
/// away, not a real panel in its own right.
pub fn remove_contained(panels: Vec<Panel>, _ctx: &RefineContext) -> Vec<Panel> {
    let n = panels.len();
    let mut drop = vec![false; n];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let Some(rect) = panels[i].overlap_rect(&panels[j]) else {
                continue;
            };
            if panels[i].area() <= 0.0 {
                continue;
            }
            if rect.area() / panels[i].area() >= 0.9 && panels[j].area() > panels[i].area() {
                drop[j] = true;
            }
        }
    }

    panels.into_iter().zip(drop).filter_map(|(p, d)| (!d).then_some(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Panel, Segment};
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
    fn no_panel_ends_up_ninety_percent_inside_another() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);
        // A near-whole-page false outer frame plus a real inner panel.
        let frame = Panel::from_rect(0, 0, 800, 600, 800, 600, 0.02);
        let inner = Panel::from_rect(50, 50, 400, 400, 800, 600, 0.02);

        let result = remove_contained(vec![frame, inner], &ctx(&config, &segments, &gray));

        for i in 0..result.len() {
            for j in 0..result.len() {
                if i == j {
                    continue;
                }
                let Some(rect) = result[i].overlap_rect(&result[j]) else {
                    continue;
                };
                assert!(rect.area() / result[i].area() < 0.9);
            }
        }
    }

    #[test]
    fn disjoint_panels_survive_untouched() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);
        let a = Panel::from_rect(0, 0, 100, 100, 800, 600, 0.02);
        let b = Panel::from_rect(200, 200, 300, 300, 800, 600, 0.02);
        let result = remove_contained(vec![a, b], &ctx(&config, &segments, &gray));
        assert_eq!(result.len(), 2);
    }
}
