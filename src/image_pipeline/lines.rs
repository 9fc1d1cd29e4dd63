use image::GrayImage;
use imageproc::hough::{detect_lines, LineDetectionOptions, PolarLine};

use crate::geom::{Point, Segment};

/// Detects straight line segments in the edge image.
///
/// There is no off-the-shelf LSD crate in the Rust ecosystem (see
/// SPEC_FULL.md §4.3); this uses `imageproc::hough::detect_lines` to find
/// infinite-line peaks, then walks the edge image along each peak's
/// direction to recover finite endpoints — the standard Hough→segment
/// extraction technique.
pub fn detect_segments(edges: &GrayImage, min_segment_ratio: f64) -> Vec<Segment> {
    let (w, h) = edges.dimensions();
    let min_len = (w.min(h) as f64) * min_segment_ratio;

    let options = LineDetectionOptions {
        vote_threshold: ((w.min(h)) / 8).max(10),
        suppression_radius: 8,
    };
    let lines = detect_lines(edges, options);

    lines
        .into_iter()
        .filter_map(|line| segment_from_polar_line(edges, &line, min_len))
        .collect()
}

fn segment_from_polar_line(edges: &GrayImage, line: &PolarLine, min_len: f64) -> Option<Segment> {
    let (w, h) = edges.dimensions();
    let theta = (line.angle_in_degrees as f64).to_radians();
    let (sin_t, cos_t) = theta.sin_cos();

    // Direction along the line is perpendicular to (cos_t, sin_t).
    let (dir_x, dir_y) = (-sin_t, cos_t);
    const TOLERANCE: f64 = 3.0;

    let mut first: Option<Point> = None;
    let mut last: Option<Point> = None;

    let diagonal = ((w * w + h * h) as f64).sqrt();
    let steps = diagonal.ceil() as i64;
    for step in -steps..=steps {
        let x = line.r as f64 * cos_t + step as f64 * dir_x;
        let y = line.r as f64 * sin_t + step as f64 * dir_y;
        if x < 0.0 || y < 0.0 || x >= w as f64 || y >= h as f64 {
            continue;
        }
        if !pixel_near_line(edges, x, y, TOLERANCE) {
            continue;
        }
        let p = Point::new(x.round() as i64, y.round() as i64);
        if first.is_none() {
            first = Some(p);
        }
        last = Some(p);
    }

    match (first, last) {
        (Some(a), Some(b)) => {
            let seg = Segment::new(a, b);
            if seg.length() >= min_len {
                Some(seg)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn pixel_near_line(edges: &GrayImage, cx: f64, cy: f64, tolerance: f64) -> bool {
    let (w, h) = edges.dimensions();
    let r = tolerance.ceil() as i64;
    for oy in -r..=r {
        for ox in -r..=r {
            let x = cx as i64 + ox;
            let y = cy as i64 + oy;
            if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                continue;
            }
            if edges.get_pixel(x as u32, y as u32)[0] > 0 {
                return true;
            }
        }
    }
    false
}

/// `1.0` at 0/90 degrees, `0.0` at 45 degrees, linear in between.
pub fn axis_alignment(seg: &Segment) -> f64 {
    let angle_deg = (seg.dy().abs() as f64).atan2(seg.dx().abs() as f64).to_degrees();
    1.0 - angle_deg.min(90.0 - angle_deg) / 45.0
}

/// Score a segment per §4.3: `length / min(W,H) * (1 + axis_alignment)` when
/// `prefer_axis_aligned`, else just `length / min(W,H)`.
pub fn score_segment(seg: &Segment, min_dim: f64, prefer_axis_aligned: bool) -> f64 {
    let base = seg.length() / min_dim;
    if prefer_axis_aligned {
        base * (1.0 + axis_alignment(seg))
    } else {
        base
    }
}

/// Keeps the top `max_segments` by score, ties broken by original (insertion) order.
pub fn top_k_by_score(mut scored: Vec<(Segment, f64)>, max_segments: usize) -> Vec<Segment> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(max_segments);
    scored.into_iter().map(|(s, _)| s).collect()
}
