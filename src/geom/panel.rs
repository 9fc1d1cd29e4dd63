use super::point::Point;
use super::segment::Segment;

/// Whether a panel carries only its axis-aligned bounds, or a polygon that
/// refines them. Only `Polygonal` panels can ever be split (§4.2); once
/// small-panel grouping replaces a cluster with one panel, the replacement
/// is always `BoundingOnly`, even if the originals had polygons — grouping
/// permanently freezes splitting for that region.
#[derive(Debug, Clone)]
pub enum PanelShape {
    BoundingOnly,
    Polygonal(Vec<Point>),
}

/// An axis-aligned working panel, optionally refined by a polygon.
///
/// Carries its owning image size and the minimum-panel-size ratio so that
/// size predicates (`is_small`) don't need a context object threaded
/// through every call site.
#[derive(Debug, Clone)]
pub struct Panel {
    pub x: i64,
    pub y: i64,
    pub right: i64,
    pub bottom: i64,
    pub shape: PanelShape,
    pub splittable: bool,
    pub split_coverage: Option<f64>,
    image_w: i64,
    image_h: i64,
    min_panel_ratio: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rect {
    pub x: i64,
    pub y: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Rect {
    pub fn area(&self) -> f64 {
        ((self.right - self.x).max(0) as f64) * ((self.bottom - self.y).max(0) as f64)
    }
}

/// The result of a successful polygon split: two sub-panels plus the
/// segment along which they were separated.
pub struct Split {
    pub a: Panel,
    pub b: Panel,
    pub segment: Segment,
    pub coverage: f64,
}

impl Panel {
    pub fn from_rect(x: i64, y: i64, right: i64, bottom: i64, image_w: i64, image_h: i64, min_panel_ratio: f64) -> Self {
        Self {
            x,
            y,
            right,
            bottom,
            shape: PanelShape::BoundingOnly,
            splittable: false,
            split_coverage: None,
            image_w,
            image_h,
            min_panel_ratio,
        }
    }

    pub fn from_polygon(poly: Vec<Point>, image_w: i64, image_h: i64, min_panel_ratio: f64) -> Self {
        let (x, y, right, bottom) = bounding_rect(&poly);
        Self {
            x,
            y,
            right,
            bottom,
            shape: PanelShape::Polygonal(poly),
            splittable: true,
            split_coverage: None,
            image_w,
            image_h,
            min_panel_ratio,
        }
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.right - self.x
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bottom - self.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        (self.width().max(0) as f64) * (self.height().max(0) as f64)
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        ((self.width().pow(2) + self.height().pow(2)) as f64).sqrt()
    }

    /// True if both endpoints of `seg` fall within this panel's bounds.
    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.bounding_contains_segment(seg)
    }

    #[inline]
    pub fn image_size(&self) -> (i64, i64) {
        (self.image_w, self.image_h)
    }

    #[inline]
    pub fn min_panel_ratio(&self) -> f64 {
        self.min_panel_ratio
    }

    pub fn polygon(&self) -> Option<&[Point]> {
        match &self.shape {
            PanelShape::Polygonal(poly) => Some(poly),
            PanelShape::BoundingOnly => None,
        }
    }

    /// Width/height equality tolerance, per §4.2: `wt = w/10`, `ht = h/10`.
    fn tolerance(&self) -> (i64, i64) {
        ((self.width() / 10).max(1), (self.height() / 10).max(1))
    }

    pub fn equals(&self, other: &Panel) -> bool {
        let (wt, ht) = self.tolerance();
        (self.x - other.x).abs() <= wt
            && (self.y - other.y).abs() <= ht
            && (self.right - other.right).abs() <= wt
            && (self.bottom - other.bottom).abs() <= ht
    }

    pub fn is_small(&self, extra: f64) -> bool {
        let w_thresh = self.image_w as f64 * self.min_panel_ratio * extra;
        let h_thresh = self.image_h as f64 * self.min_panel_ratio * extra;
        (self.width() as f64) < w_thresh || (self.height() as f64) < h_thresh
    }

    pub fn is_very_small(&self) -> bool {
        self.is_small(0.1)
    }

    pub(crate) fn overlap_rect(&self, other: &Panel) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if right > x && bottom > y {
            Some(Rect { x, y, right, bottom })
        } else {
            None
        }
    }

    pub fn overlaps(&self, other: &Panel) -> bool {
        let Some(rect) = self.overlap_rect(other) else {
            return false;
        };
        let min_area = self.area().min(other.area());
        if min_area <= 0.0 {
            return true;
        }
        rect.area() > 0.1 * min_area
    }

    pub fn contains(&self, other: &Panel) -> bool {
        let Some(rect) = self.overlap_rect(other) else {
            return false;
        };
        if other.area() <= 0.0 {
            return false;
        }
        rect.area() / other.area() > 0.5
    }

    pub fn same_row(&self, other: &Panel) -> bool {
        let top = self.y.max(other.y);
        let bottom = self.bottom.min(other.bottom);
        let overlap = (bottom - top).max(0);
        let min_h = self.height().min(other.height());
        if min_h <= 0 {
            return false;
        }
        let contained = (self.y <= other.y && self.bottom >= other.bottom)
            || (other.y <= self.y && other.bottom >= self.bottom);
        contained || (overlap as f64) >= min_h as f64 / 3.0
    }

    pub fn same_col(&self, other: &Panel) -> bool {
        let left = self.x.max(other.x);
        let right = self.right.min(other.right);
        let overlap = (right - left).max(0);
        let min_w = self.width().min(other.width());
        if min_w <= 0 {
            return false;
        }
        let contained = (self.x <= other.x && self.right >= other.right)
            || (other.x <= self.x && other.right >= self.right);
        contained || (overlap as f64) >= min_w as f64 / 3.0
    }

    pub fn bumps_into(&self, others: &[&Panel]) -> bool {
        others.iter().any(|p| self.overlaps(p))
    }

    /// Distance between panel centers, used by `is_close` in small-panel
    /// grouping (§4.4 step 2): within 0.75x the summed widths and heights.
    pub fn is_close(&self, other: &Panel) -> bool {
        let (cx1, cy1) = self.center();
        let (cx2, cy2) = other.center();
        let dx = (cx1 - cx2).abs() as f64;
        let dy = (cy1 - cy2).abs() as f64;
        dx <= 0.75 * (self.width() + other.width()) as f64 && dy <= 0.75 * (self.height() + other.height()) as f64
    }

    fn center(&self) -> (i64, i64) {
        ((self.x + self.right).div_euclid(2), (self.y + self.bottom).div_euclid(2))
    }

    /// Bounding rect of the union of `self` and `other`, used for big-panel
    /// grouping candidate evaluation.
    pub fn group_with(&self, other: &Panel) -> Panel {
        Panel::from_rect(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.image_w,
            self.image_h,
            self.min_panel_ratio,
        )
    }

    fn with_bounds(&self, x: i64, y: i64, right: i64, bottom: i64) -> Panel {
        Panel::from_rect(x, y, right, bottom, self.image_w, self.image_h, self.min_panel_ratio)
    }

    /// For each direction `other` extends beyond `self`, try expanding self
    /// to that side; discard any candidate that bumps into `rest` (every
    /// other panel besides `self` and `other`); keep the largest surviving
    /// candidate, or `self` unchanged if none survive.
    pub fn merge(&self, other: &Panel, rest: &[&Panel]) -> Panel {
        let mut candidates = vec![self.clone()];
        if other.x < self.x {
            candidates.push(self.with_bounds(other.x, self.y, self.right, self.bottom));
        }
        if other.y < self.y {
            candidates.push(self.with_bounds(self.x, other.y, self.right, self.bottom));
        }
        if other.right > self.right {
            candidates.push(self.with_bounds(self.x, self.y, other.right, self.bottom));
        }
        if other.bottom > self.bottom {
            candidates.push(self.with_bounds(self.x, self.y, self.right, other.bottom));
        }

        candidates
            .into_iter()
            .filter(|c| !c.bumps_into(rest))
            .max_by(|a, b| a.area().partial_cmp(&b.area()).unwrap())
            .unwrap_or_else(|| self.clone())
    }

    fn bounding_contains_segment(&self, seg: &Segment) -> bool {
        let in_a = seg.a.x >= self.x && seg.a.x <= self.right && seg.a.y >= self.y && seg.a.y <= self.bottom;
        let in_b = seg.b.x >= self.x && seg.b.x <= self.right && seg.b.y >= self.y && seg.b.y <= self.bottom;
        in_a && in_b
    }

    /// Attempts a polygon-based split (§4.2). Only defined for `Polygonal`,
    /// `splittable` panels. `segments` is the page's detected line-segment
    /// set, used to score candidate splits by how well they're backed by a
    /// drawn gutter line.
    pub fn try_split(&self, segments: &[Segment]) -> Option<Split> {
        let poly = match &self.shape {
            PanelShape::Polygonal(poly) if self.splittable => poly,
            _ => return None,
        };
        if poly.len() < 3 {
            return None;
        }
        if self.is_small(2.0) {
            return None;
        }

        let refined = self.refine_polygon(poly);
        let n = refined.len();
        if n < 6 {
            return None;
        }

        let w = self.width() as f64;
        let h = self.height() as f64;

        let mut best: Option<(Split, f64)> = None;

        for i in 0..n {
            for j in (i + 3)..n {
                let wrap_dist = (j - i).min(n - (j - i));
                if wrap_dist < 3 {
                    continue;
                }
                let pi = refined[i];
                let pj = refined[j];
                if (pi.x - pj.x).abs() as f64 > w / 3.0 {
                    continue;
                }
                if (pi.y - pj.y).abs() as f64 > h / 3.0 {
                    continue;
                }

                let (poly_a, poly_b) = partition_polygon(&refined, i, j);
                if poly_a.len() < 3 || poly_b.len() < 3 {
                    continue;
                }

                let panel_a = Panel::from_polygon(poly_a, self.image_w, self.image_h, self.min_panel_ratio);
                let panel_b = Panel::from_polygon(poly_b, self.image_w, self.image_h, self.min_panel_ratio);

                if panel_a.is_small(1.0) || panel_b.is_small(1.0) {
                    continue;
                }
                if panel_a.equals(self) || panel_b.equals(self) {
                    continue;
                }
                if panel_a.overlaps(&panel_b) {
                    continue;
                }

                let split_segment = Segment::along_polygon(&refined, i, j);
                let seg_len = split_segment.length();
                if seg_len <= 0.0 {
                    continue;
                }

                let covered: f64 = segments
                    .iter()
                    .filter(|s| self.bounding_contains_segment(s))
                    .filter_map(|s| split_segment.intersect(s))
                    .map(|m| m.length())
                    .sum();

                let coverage = covered / seg_len;
                if coverage <= 0.5 {
                    continue;
                }

                if best.as_ref().map_or(true, |(_, best_cov)| covered > *best_cov) {
                    best = Some((
                        Split {
                            a: panel_a,
                            b: panel_b,
                            segment: split_segment,
                            coverage,
                        },
                        covered,
                    ));
                }
            }
        }

        best.map(|(s, _)| s)
    }

    /// Collapse near-duplicate vertices and inject intermediary dots on long
    /// edges (§4.2 steps 2–3).
    fn refine_polygon(&self, poly: &[Point]) -> Vec<Point> {
        let w = self.width() as f64;
        let h = self.height() as f64;
        let diagonal = (w * w + h * h).sqrt();
        let collapse_x = (w / 3.0) / 10.0;
        let collapse_y = (h / 3.0) / 10.0;
        let long_edge = diagonal / 5.0 * 2.0;
        let inset = diagonal / 5.0;
        let proj_tol_x = w / 3.0;
        let proj_tol_y = h / 3.0;

        let collapsed = collapse_dots(poly, collapse_x, collapse_y);
        let n = collapsed.len();
        if n < 3 {
            return collapsed;
        }

        let mut augmented = Vec::with_capacity(n * 2);
        for idx in 0..n {
            let a = collapsed[idx];
            let b = collapsed[(idx + 1) % n];
            augmented.push(a);

            let edge = Segment::new(a, b);
            if edge.length() <= long_edge {
                continue;
            }

            let mut intermediaries: Vec<(f64, Point)> = Vec::new();
            for (k, &cand) in collapsed.iter().enumerate() {
                if k == idx || k == (idx + 1) % n {
                    continue;
                }
                let proj = edge.project(cand);
                if !edge.bounding_contains(proj) {
                    continue;
                }
                let dx = (cand.x - proj.x).abs() as f64;
                let dy = (cand.y - proj.y).abs() as f64;
                if dx <= proj_tol_x && dy <= proj_tol_y {
                    let t = ((proj.x - a.x) as f64 * edge.dx() as f64 + (proj.y - a.y) as f64 * edge.dy() as f64)
                        / (edge.length() * edge.length() + f64::EPSILON);
                    intermediaries.push((t, proj));
                }
            }
            intermediaries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

            let dir_len = edge.length();
            if dir_len > 0.0 {
                let ux = edge.dx() as f64 / dir_len;
                let uy = edge.dy() as f64 / dir_len;
                let inset_clamped = inset.min(dir_len / 2.0 - 1.0).max(0.0);
                augmented.push(Point::new(
                    (a.x as f64 + ux * inset_clamped).round() as i64,
                    (a.y as f64 + uy * inset_clamped).round() as i64,
                ));
                for (_, p) in &intermediaries {
                    augmented.push(*p);
                }
                augmented.push(Point::new(
                    (b.x as f64 - ux * inset_clamped).round() as i64,
                    (b.y as f64 - uy * inset_clamped).round() as i64,
                ));
            }
        }

        collapse_dots(&augmented, collapse_x, collapse_y)
    }
}

fn bounding_rect(poly: &[Point]) -> (i64, i64, i64, i64) {
    let xs = poly.iter().map(|p| p.x);
    let ys = poly.iter().map(|p| p.y);
    (
        xs.clone().min().unwrap_or(0),
        ys.clone().min().unwrap_or(0),
        xs.max().unwrap_or(0),
        ys.max().unwrap_or(0),
    )
}

/// Collapses consecutive polygon vertices closer than `(tol_x, tol_y)` in
/// both axes into their midpoint.
fn collapse_dots(poly: &[Point], tol_x: f64, tol_y: f64) -> Vec<Point> {
    if poly.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<Point> = Vec::with_capacity(poly.len());
    for &p in poly {
        if let Some(&last) = out.last() {
            if ((p.x - last.x).abs() as f64) <= tol_x && ((p.y - last.y).abs() as f64) <= tol_y {
                let merged = Point::new((p.x + last.x).div_euclid(2), (p.y + last.y).div_euclid(2));
                *out.last_mut().unwrap() = merged;
                continue;
            }
        }
        out.push(p);
    }
    if out.len() > 1 {
        let first = out[0];
        let last = *out.last().unwrap();
        if ((first.x - last.x).abs() as f64) <= tol_x && ((first.y - last.y).abs() as f64) <= tol_y {
            let merged = Point::new((first.x + last.x).div_euclid(2), (first.y + last.y).div_euclid(2));
            out.pop();
            out[0] = merged;
        }
    }
    out
}

/// Splits a closed polygon ring into two sub-rings at indices `i` and `j`
/// (each sub-ring includes both split vertices, closing the gap directly).
fn partition_polygon(poly: &[Point], i: usize, j: usize) -> (Vec<Point>, Vec<Point>) {
    let n = poly.len();
    let mut a = Vec::new();
    let mut k = i;
    loop {
        a.push(poly[k]);
        if k == j {
            break;
        }
        k = (k + 1) % n;
    }

    let mut b = Vec::new();
    let mut k = j;
    loop {
        b.push(poly[k]);
        if k == i {
            break;
        }
        k = (k + 1) % n;
    }

    (a, b)
}

/// Given a panel slice and an index into it, finds the neighbor sharing a
/// column whose bottom edge is closest above `panels[i]`'s top edge.
pub fn top_neighbor(panels: &[Panel], i: usize) -> Option<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.bottom <= p.y && p.same_col(q))
        .max_by_key(|(_, q)| q.bottom)
        .map(|(j, _)| j)
}

pub fn bottom_neighbor(panels: &[Panel], i: usize) -> Option<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.y >= p.bottom && p.same_col(q))
        .min_by_key(|(_, q)| q.y)
        .map(|(j, _)| j)
}

pub fn left_neighbor(panels: &[Panel], i: usize) -> Option<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.right <= p.x && p.same_row(q))
        .max_by_key(|(_, q)| q.right)
        .map(|(j, _)| j)
}

pub fn right_neighbor(panels: &[Panel], i: usize) -> Option<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.x >= p.right && p.same_row(q))
        .min_by_key(|(_, q)| q.x)
        .map(|(j, _)| j)
}

/// All neighbors strictly to the left of `panels[i]` sharing a row (used by
/// the LTR must-precede set).
pub fn left_row_neighbors(panels: &[Panel], i: usize) -> Vec<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.right <= p.x && p.same_row(q))
        .map(|(j, _)| j)
        .collect()
}

/// All neighbors strictly to the right of `panels[i]` sharing a row (used by
/// the RTL must-precede set).
pub fn right_row_neighbors(panels: &[Panel], i: usize) -> Vec<usize> {
    let p = &panels[i];
    panels
        .iter()
        .enumerate()
        .filter(|&(j, q)| j != i && q.x >= p.right && p.same_row(q))
        .map(|(j, _)| j)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(x: i64, y: i64, r: i64, b: i64) -> Panel {
        Panel::from_rect(x, y, r, b, 800, 600, 0.02)
    }

    #[test]
    fn overlaps_is_commutative() {
        let a = panel(0, 0, 100, 100);
        let b = panel(50, 50, 150, 150);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn group_with_contains_both_inputs() {
        let a = panel(0, 0, 50, 50);
        let b = panel(100, 100, 200, 200);
        let g = a.group_with(&b);
        assert!(g.x <= a.x && g.y <= a.y && g.right >= a.right && g.bottom >= a.bottom);
        assert!(g.x <= b.x && g.y <= b.y && g.right >= b.right && g.bottom >= b.bottom);
    }

    #[test]
    fn merge_with_no_other_panels_never_shrinks_self() {
        let a = panel(0, 0, 50, 50);
        let b = panel(0, 0, 100, 100);
        let merged = a.merge(&b, &[]);
        assert!(merged.x <= a.x && merged.y <= a.y && merged.right >= a.right && merged.bottom >= a.bottom);
    }

    #[test]
    fn contains_is_not_commutative() {
        let outer = panel(0, 0, 100, 100);
        let inner = panel(10, 10, 20, 20);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }
}
