//! The panel refinement cascade (§4.4): repeatedly reshapes a working set of
//! panels from raw contours into the final per-page panel layout.

mod context;
mod deoverlap;
mod exclude_small;
mod expand;
mod fallback;
mod group_big;
mod group_small;
mod gutters;
mod initial;
mod merge_contained;
mod remove_contained;
mod split;

pub use context::RefineContext;
pub use gutters::{collect as collect_gutters, Gutters};

use crate::geom::Panel;

/// Runs every refinement stage in order against the pipeline's raw contours,
/// producing the final panel set for the page.
pub fn run(contours: Vec<Vec<crate::geom::Point>>, ctx: &RefineContext) -> Vec<Panel> {
    let panels = initial::construct(contours, ctx);
    let panels = group_small::group_small(panels, ctx);
    let panels = split::split(panels, ctx);
    let panels = exclude_small::exclude_small(panels, ctx);
    let panels = merge_contained::merge_contained(panels, ctx);
    let panels = deoverlap::deoverlap(panels, ctx);
    let panels = expand::expand(panels, ctx);
    let panels = fallback::fallback(panels, ctx);
    let panels = group_big::group_big(panels, ctx);
    remove_contained::remove_contained(panels, ctx)
}
