use geo::algorithm::{BoundingRect, ConvexHull};
use geo::{MultiPoint, Point as GeoPoint};

use crate::geom::Panel;

use super::context::RefineContext;

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

fn corner_points(panel: &Panel) -> Vec<GeoPoint<f64>> {
    match panel.polygon() {
        Some(poly) => poly.iter().map(|p| GeoPoint::new(p.x as f64, p.y as f64)).collect(),
        None => vec![
            GeoPoint::new(panel.x as f64, panel.y as f64),
            GeoPoint::new(panel.right as f64, panel.y as f64),
            GeoPoint::new(panel.right as f64, panel.bottom as f64),
            GeoPoint::new(panel.x as f64, panel.bottom as f64),
        ],
    }
}

/// Stage 2: among small panels, union panels within 0.75x the summed
/// width/height of their centers (`Panel::is_close`) into connected
/// components, and replace each component of >= 2 members with a single
/// panel sized to the convex hull of the union of their corners/polygons.
pub fn group_small(panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !ctx.config.small_panel_grouping {
        return panels;
    }

    let small_indices: Vec<usize> = panels.iter().enumerate().filter(|(_, p)| p.is_small(1.0)).map(|(i, _)| i).collect();

    if small_indices.len() < 2 {
        return panels;
    }

    let mut uf = UnionFind::new(small_indices.len());
    for (a, &i) in small_indices.iter().enumerate() {
        for (b, &j) in small_indices.iter().enumerate().skip(a + 1) {
            if panels[i].is_close(&panels[j]) {
                uf.union(a, b);
            }
        }
    }

    let mut components: std::collections::HashMap<usize, Vec<usize>> = std::collections::HashMap::new();
    for (a, &i) in small_indices.iter().enumerate() {
        let root = uf.find(a);
        components.entry(root).or_default().push(i);
    }

    let mut to_remove = std::collections::HashSet::new();
    let mut replacements = Vec::new();

    for members in components.values() {
        if members.len() < 2 {
            continue;
        }
        let points: Vec<GeoPoint<f64>> = members.iter().flat_map(|&i| corner_points(&panels[i])).collect();
        let hull = MultiPoint::new(points).convex_hull();
        let Some(rect) = hull.bounding_rect() else {
            continue;
        };

        let mut replacement = Panel::from_rect(
            rect.min().x.floor() as i64,
            rect.min().y.floor() as i64,
            rect.max().x.ceil() as i64,
            rect.max().y.ceil() as i64,
            ctx.image_w,
            ctx.image_h,
            ctx.min_panel_ratio,
        );
        replacement.splittable = false;

        for &i in members {
            to_remove.insert(i);
        }
        replacements.push(replacement);
    }

    let mut result: Vec<Panel> = panels
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !to_remove.contains(i))
        .map(|(_, p)| p)
        .collect();
    result.extend(replacements);
    result
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
    fn grouping_strictly_decreases_the_count_of_small_panels() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);

        // Two tiny adjacent slivers, both well under the min-panel-ratio
        // threshold (800 * 0.02 = 16px) and close enough (centers 10px apart,
        // within 0.75x their summed 20px width) to union into one panel.
        let a = Panel::from_rect(10, 10, 20, 30, 800, 600, 0.02);
        let b = Panel::from_rect(20, 10, 30, 30, 800, 600, 0.02);
        let before_small = [&a, &b].iter().filter(|p| p.is_small(1.0)).count();
        assert_eq!(before_small, 2);

        let result = group_small(vec![a, b], &ctx(&config, &segments, &gray));

        let after_small = result.iter().filter(|p| p.is_small(1.0)).count();
        assert!(after_small < before_small, "before={before_small} after={after_small}");
    }

    #[test]
    fn distant_small_panels_are_left_alone() {
        let config = PipelineConfig::default();
        let segments = Vec::new();
        let gray = GrayImage::new(800, 600);

        let a = Panel::from_rect(10, 10, 20, 20, 800, 600, 0.02);
        let b = Panel::from_rect(700, 500, 710, 510, 800, 600, 0.02);

        let result = group_small(vec![a, b], &ctx(&config, &segments, &gray));
        assert_eq!(result.len(), 2);
    }
}
