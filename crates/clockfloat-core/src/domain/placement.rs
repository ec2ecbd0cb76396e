//! Corner-anchored placement of primary overlay windows.
//!
//! A primary window's frame is its content size scaled by the margin ratios,
//! pinned to one corner of the display's usable rectangle and inset from the
//! two adjacent edges by the padding.  The display origin is added so windows
//! on secondary displays land on their own display.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use super::orientation::Orientation;

/// Inset applied inward from the two edges adjacent to the anchor corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self { horizontal: value, vertical: value }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Scale factors from content size to window size.
///
/// A ratio above 1.0 leaves breathing room around the label text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginRatio {
    pub horizontal: f64,
    pub vertical: f64,
}

impl MarginRatio {
    pub fn uniform(value: f64) -> Self {
        Self { horizontal: value, vertical: value }
    }
}

impl Default for MarginRatio {
    fn default() -> Self {
        Self { horizontal: 1.1, vertical: 1.3 }
    }
}

/// Padding and margins shared by every window on every display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementParams {
    pub padding: Padding,
    pub margin: MarginRatio,
}

/// Returns the window size for the given content.
///
/// `width_override` replaces the derived width for windows sized to match a
/// sibling; the height is always derived from the content.
pub fn frame_size(content: Size, margin: MarginRatio, width_override: Option<f64>) -> Size {
    Size {
        width: width_override.unwrap_or(content.width * margin.horizontal),
        height: content.height * margin.vertical,
    }
}

/// Computes the frame of a primary window anchored to `orientation`.
///
/// # Example
///
/// ```
/// use clockfloat_core::{compute_rectangle, MarginRatio, Orientation, Padding, Rect, Size};
///
/// let screen = Rect::new(0.0, 0.0, 1000.0, 800.0);
/// let rect = compute_rectangle(
///     Orientation::BottomRight,
///     &screen,
///     Size::new(100.0, 20.0),
///     Padding::uniform(10.0),
///     MarginRatio::uniform(1.0),
/// );
/// assert_eq!(rect, Rect::new(890.0, 10.0, 100.0, 20.0));
/// ```
pub fn compute_rectangle(
    orientation: Orientation,
    screen: &Rect,
    content: Size,
    padding: Padding,
    margin: MarginRatio,
) -> Rect {
    let size = frame_size(content, margin, None);
    anchor(orientation, screen, size, padding)
}

/// Pins a window of `size` to the given corner of `screen`.
pub(crate) fn anchor(orientation: Orientation, screen: &Rect, size: Size, padding: Padding) -> Rect {
    let left = screen.min_x() + padding.horizontal;
    let right = screen.min_x() + screen.width - size.width - padding.horizontal;
    let top = screen.min_y() + screen.height - size.height - padding.vertical;
    let bottom = screen.min_y() + padding.vertical;

    let (x, y) = match orientation {
        Orientation::TopLeft => (left, top),
        Orientation::TopRight => (right, top),
        Orientation::BottomRight => (right, bottom),
        Orientation::BottomLeft => (left, bottom),
    };

    Rect::new(x, y, size.width, size.height)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    fn place(orientation: Orientation, screen: &Rect) -> Rect {
        compute_rectangle(
            orientation,
            screen,
            Size::new(100.0, 20.0),
            Padding::uniform(10.0),
            MarginRatio::uniform(1.0),
        )
    }

    #[test]
    fn test_compute_rectangle_bottom_right_pins_to_right_and_bottom_edges() {
        assert_eq!(place(Orientation::BottomRight, &screen()), Rect::new(890.0, 10.0, 100.0, 20.0));
    }

    #[test]
    fn test_compute_rectangle_top_left_pins_to_left_and_top_edges() {
        assert_eq!(place(Orientation::TopLeft, &screen()), Rect::new(10.0, 770.0, 100.0, 20.0));
    }

    #[test]
    fn test_compute_rectangle_top_right_pins_to_right_and_top_edges() {
        assert_eq!(place(Orientation::TopRight, &screen()), Rect::new(890.0, 770.0, 100.0, 20.0));
    }

    #[test]
    fn test_compute_rectangle_bottom_left_pins_to_left_and_bottom_edges() {
        assert_eq!(place(Orientation::BottomLeft, &screen()), Rect::new(10.0, 10.0, 100.0, 20.0));
    }

    #[test]
    fn test_compute_rectangle_adds_display_origin_for_secondary_display() {
        // Secondary display to the right of a 1000-wide primary, raised by 200.
        let secondary = Rect::new(1000.0, 200.0, 1000.0, 800.0);

        assert_eq!(
            place(Orientation::BottomLeft, &secondary),
            Rect::new(1010.0, 210.0, 100.0, 20.0)
        );
        assert_eq!(
            place(Orientation::TopRight, &secondary),
            Rect::new(1890.0, 970.0, 100.0, 20.0)
        );
    }

    #[test]
    fn test_compute_rectangle_scales_content_by_margin_ratios() {
        // Arrange
        let margin = MarginRatio { horizontal: 1.5, vertical: 2.0 };

        // Act
        let rect = compute_rectangle(
            Orientation::BottomLeft,
            &screen(),
            Size::new(100.0, 20.0),
            Padding::uniform(0.0),
            margin,
        );

        // Assert
        assert_eq!(rect.width, 150.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn test_compute_rectangle_applies_horizontal_and_vertical_padding_independently() {
        let padding = Padding { horizontal: 5.0, vertical: 30.0 };
        let rect = compute_rectangle(
            Orientation::TopRight,
            &screen(),
            Size::new(100.0, 20.0),
            padding,
            MarginRatio::uniform(1.0),
        );
        assert_eq!(rect, Rect::new(895.0, 750.0, 100.0, 20.0));
    }

    #[test]
    fn test_frame_size_width_override_replaces_derived_width_only() {
        let size = frame_size(Size::new(40.0, 10.0), MarginRatio::uniform(2.0), Some(300.0));
        assert_eq!(size, Size::new(300.0, 20.0));
    }

    #[test]
    fn test_placement_params_default_matches_shipped_margins() {
        let params = PlacementParams::default();
        assert_eq!(params.padding, Padding::uniform(10.0));
        assert_eq!(params.margin, MarginRatio { horizontal: 1.1, vertical: 1.3 });
    }
}
