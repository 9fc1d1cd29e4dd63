use crate::geom::Panel;

use super::context::RefineContext;

/// Stage 4: drop panels that are still small after splitting and grouping —
/// these are treated as noise (speech-bubble fragments, stray contour bits)
/// rather than real panels.
pub fn exclude_small(panels: Vec<Panel>, _ctx: &RefineContext) -> Vec<Panel> {
    panels.into_iter().filter(|p| !p.is_small(1.0)).collect()
}
