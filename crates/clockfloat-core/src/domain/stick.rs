//! Stick relation: derives a dependent window's frame from its primary.
//!
//! The dependent always inherits the primary's width and x position and sits
//! flush against the primary on the side facing the display interior:
//!
//! ```text
//!  top corners               bottom corners
//! ┌────────────┐            ┌────────────┐
//! │  primary   │ ◄ edge     │ dependent  │
//! ├────────────┤            ├────────────┤
//! │ dependent  │            │  primary   │ ◄ edge
//! └────────────┘            └────────────┘
//! ```
//!
//! For a primary pinned to a top corner the fixed edge is the primary's
//! bottom; for a bottom corner it is the primary's top.
//!
//! Bottom corners compute the dependent's `y` as `primary.y + primary.height`,
//! the same expression as the primary's top edge, so they meet exactly.  Top
//! corners store `primary.y - height`; reading the dependent's top back as
//! `y + height` is exact when the values are representable (whole or
//! half points) and otherwise within a few ulps of `primary.y`.

use super::geometry::{Rect, Size};
use super::orientation::Orientation;
use super::placement::MarginRatio;

/// Computes the dependent frame for `primary` under the shared orientation.
pub fn compute_dependent_rectangle(
    primary: &Rect,
    orientation: Orientation,
    dependent_height: f64,
) -> Rect {
    let y = if orientation.is_top() {
        primary.y - dependent_height
    } else {
        primary.y + primary.height
    };

    Rect::new(primary.x, y, primary.width, dependent_height)
}

/// Returns the dependent window's height for its natural content size.
///
/// Only the vertical margin applies; the width comes from the primary.
pub fn dependent_height(content: Size, margin: MarginRatio) -> f64 {
    content.height * margin.vertical
}

// ── Tests ─────────────────────────────────────────────────────────────────────
