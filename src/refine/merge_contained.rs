use crate::geom::Panel;

use super::context::RefineContext;

/// Stage 5 (only runs after splitting): for each containing/contained pair,
/// the container absorbs the contained via `Panel::merge` — expanding only
/// where the merge doesn't bump into any other panel — and the contained
/// panel is dropped.
pub fn merge_contained(mut panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !ctx.config.panel_splitting {
        return panels;
    }

    let mut dropped = vec![false; panels.len()];

    loop {
        let n = panels.len();
        let pair = (0..n).find_map(|i| {
            if dropped[i] {
                return None;
            }
            (0..n).find_map(|j| {
                if i == j || dropped[j] {
                    return None;
                }
                panels[i].contains(&panels[j]).then_some((i, j))
            })
        });

        let Some((container, contained)) = pair else {
            break;
        };

        let rest: Vec<&Panel> = panels
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != container && k != contained && !dropped[k])
            .map(|(_, p)| p)
            .collect();

        panels[container] = panels[container].merge(&panels[contained], &rest);
        dropped[contained] = true;
    }

    panels.into_iter().zip(dropped).filter_map(|(p, d)| (!d).then_some(p)).collect()
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
    fn contained_panel_is_dropped() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);
        let outer = Panel::from_rect(0, 0, 400, 400, 800, 600, 0.02);
        let inner = Panel::from_rect(50, 50, 100, 100, 800, 600, 0.02);
        let result = merge_contained(vec![outer, inner], &ctx(&config, &segments, &gray));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn disjoint_panels_are_left_alone() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);
        let a = Panel::from_rect(0, 0, 100, 100, 800, 600, 0.02);
        let b = Panel::from_rect(200, 200, 300, 300, 800, 600, 0.02);
        let result = merge_contained(vec![a, b], &ctx(&config, &segments, &gray));
        assert_eq!(result.len(), 2);
    }
}
