use image::GrayImage;

use crate::geom::{Panel, Segment};

use super::context::RefineContext;

fn gutter_variance(gray: &GrayImage, segment: &Segment, band: i64) -> f64 {
    let (w, h) = gray.dimensions();
    let steps = segment.length().ceil() as i64;
    if steps == 0 {
        return 0.0;
    }

    let (dx, dy) = segment.unit_normal();
    let mut samples = Vec::new();

    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let px = segment.a.x as f64 + t * segment.dx() as f64;
        let py = segment.a.y as f64 + t * segment.dy() as f64;

        for offset in -band..=band {
            let x = (px + offset as f64 * dx).round() as i64;
            let y = (py + offset as f64 * dy).round() as i64;
            if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
                continue;
            }
            samples.push(gray.get_pixel(x as u32, y as u32)[0] as f64);
        }
    }

    if samples.len() < 2 {
        return f64::MAX;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

/// Gutter-color variance above this means the candidate split line runs
/// through art rather than a blank gutter, and is rejected (§4.4 step 3;
/// literal constant carried over from the teacher's objective thresholds,
/// see DESIGN.md).
const MAX_GUTTER_VARIANCE: f64 = 400.0;

/// Stage 3: repeatedly take the largest-area splittable panel, attempt a
/// polygon split (`Panel::try_split`), validate the split line runs through a
/// low-variance (blank) gutter in the grayscale image, and replace the panel
/// with its two children. Stops when no remaining panel splits successfully.
pub fn split(mut panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !ctx.config.panel_splitting {
        return panels;
    }

    loop {
        let candidate_idx = panels
            .iter()
            .enumerate()
            .filter(|(_, p)| p.splittable)
            .max_by(|(_, a), (_, b)| a.area().partial_cmp(&b.area()).unwrap())
            .map(|(i, _)| i);

        let Some(idx) = candidate_idx else {
            break;
        };

        let Some(split) = panels[idx].try_split(ctx.segments) else {
            panels[idx].splittable = false;
            continue;
        };

        let band = ((split.segment.length() / 50.0).round() as i64).clamp(1, 6);
        if gutter_variance(ctx.gray, &split.segment, band) > MAX_GUTTER_VARIANCE {
            panels[idx].splittable = false;
            continue;
        }

        let mut a = split.a;
        let mut b = split.b;
        a.split_coverage = Some(split.coverage);
        b.split_coverage = Some(split.coverage);

        panels.remove(idx);
        panels.push(a);
        panels.push(b);
    }

    panels
}
