//! Floating placement relative to an anchor
//!
//! Computes where a floating list goes given the anchor's bounds and the
//! visible viewport, independent of whatever produced those coordinates
//! (a browser, a native window, a terminal grid).
//!
//! The list prefers to open below the anchor. It flips above only when the
//! content does not fit below and there is more room above. The left edge is
//! clamped so the list stays inside the viewport margins.

use dropkit_core::Rect;
use serde::Deserialize;

/// Which side of the anchor the list was placed on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementSide {
    #[default]
    Below,
    Above,
}

/// Tunables for [`place`]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    /// Gap between the anchor and the list
    pub offset: f32,
    /// Upper bound for the list height
    pub max_height: f32,
    /// Lower bound for the list width (the anchor width is used otherwise)
    pub min_width: f32,
    /// Space kept free at the viewport edges
    pub viewport_margin: f32,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            offset: 4.0,
            max_height: 240.0,
            min_width: 0.0,
            viewport_margin: 8.0,
        }
    }
}

/// Result of a placement pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    /// Height available to the list; content taller than this scrolls
    pub max_height: f32,
    pub side: PlacementSide,
}

/// Place a list of `content_height` next to `anchor` inside `viewport`
pub fn place(
    anchor: Rect,
    viewport: Rect,
    content_height: f32,
    options: &PlacementOptions,
) -> Placement {
    let margin = options.viewport_margin;
    let wanted = content_height.max(0.0).min(options.max_height);

    let space_below =
        (viewport.bottom() - margin - (anchor.bottom() + options.offset)).max(0.0);
    let space_above = (anchor.y - options.offset - (viewport.y + margin)).max(0.0);

    let (side, max_height) = if wanted <= space_below || space_below >= space_above {
        (PlacementSide::Below, wanted.min(space_below))
    } else {
        (PlacementSide::Above, wanted.min(space_above))
    };

    let top = match side {
        PlacementSide::Below => anchor.bottom() + options.offset,
        PlacementSide::Above => anchor.y - options.offset - max_height,
    };

    let usable_width = (viewport.width - 2.0 * margin).max(0.0);
    let width = anchor.width.max(options.min_width).min(usable_width);

    let min_left = viewport.x + margin;
    let max_left = viewport.right() - margin - width;
    let left = anchor.x.min(max_left).max(min_left);

    tracing::trace!(?side, top, left, width, max_height, "placed dropdown list");

    Placement {
        top,
        left,
        width,
        max_height,
        side,
    }
}
