use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::geom::Point;

/// External contour extraction over a binary image, returning each contour
/// as a closed polygon ring in image coordinates.
pub fn extract_contours(binary: &GrayImage) -> Vec<Vec<Point>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| c.points.into_iter().map(|p| Point::new(p.x as i64, p.y as i64)).collect())
        .collect()
}

/// Ramer–Douglas–Peucker-style polygon simplification with
/// `epsilon = 0.001 * arclength` (§4.4 step 1).
pub fn approximate_polygon(poly: &[Point]) -> Vec<Point> {
    let arclength: f64 = poly
        .windows(2)
        .map(|w| (((w[1].x - w[0].x).pow(2) + (w[1].y - w[0].y).pow(2)) as f64).sqrt())
        .sum();
    let epsilon = 0.001 * arclength;
    simplify_rdp(poly, epsilon.max(1.0))
}

fn simplify_rdp(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = *points.last().unwrap();
    let (mut max_dist, mut max_idx) = (0.0, 0usize);

    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_rdp(&points[..=max_idx], epsilon);
        let right = simplify_rdp(&points[max_idx..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return (((p.x - a.x).pow(2) + (p.y - a.y).pow(2)) as f64).sqrt();
    }
    ((dy * (p.x - a.x) as f64 - dx * (p.y - a.y) as f64).abs()) / len
}
