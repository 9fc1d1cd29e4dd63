use crate::geom::Panel;

use super::context::RefineContext;

/// Stage 8: if refinement emptied the working set entirely, inject a single
/// panel covering the whole page rather than reporting zero panels.
pub fn fallback(panels: Vec<Panel>, ctx: &RefineContext) -> Vec<Panel> {
    if !panels.is_empty() {
        return panels;
    }
    vec![Panel::from_rect(0, 0, ctx.image_w, ctx.image_h, ctx.image_w, ctx.image_h, ctx.min_panel_ratio)]
}
