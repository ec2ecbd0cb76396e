//! Integration tests for placement, stick, and evasion through the public API.
//!
//! Each test sweeps a small grid of displays, content sizes, and corners rather
//! than a single fixture, so the geometric invariants are checked on secondary
//! displays with negative and non-zero origins too.

use clockfloat_core::{
    compute_dependent_rectangle, compute_rectangle, Display, LabelKind, MarginRatio,
    Orientation, OverlayWindow, Padding, PlacementParams, Rect, Size, WindowHandle, WindowPair,
};

fn screens() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, 1000.0, 800.0),
        Rect::new(1920.0, 0.0, 2560.0, 1440.0),
        Rect::new(-1280.0, 200.0, 1280.0, 1024.0),
    ]
}

fn contents() -> Vec<Size> {
    vec![Size::new(100.0, 20.0), Size::new(64.0, 26.0), Size::new(1.0, 1.0)]
}

fn pair_on(screen: Rect, orientation: Orientation, params: &PlacementParams) -> WindowPair {
    let display = Display::new(0, screen);
    let time = Size::new(96.0, 44.0);
    let date = Size::new(120.0, 16.0);
    let frames = WindowPair::layout(orientation, &display.usable, time, date, params);
    let primary = OverlayWindow::primary(
        WindowHandle(10),
        LabelKind::Time,
        display.id,
        time,
        frames.primary,
        true,
    );
    let dependent =
        OverlayWindow::dependent_of(&primary, WindowHandle(11), LabelKind::Date, date, frames.dependent);
    WindowPair::new(display, orientation, primary, dependent)
}

// ── Orientation ───────────────────────────────────────────────────────────────

#[test]
fn test_orientation_four_advances_return_to_start_visiting_each_once() {
    for start in Orientation::ALL {
        let mut seen = vec![start];
        let mut current = start;
        for _ in 0..3 {
            current = current.advance();
            seen.push(current);
        }

        assert_eq!(current.advance(), start);
        for o in Orientation::ALL {
            assert_eq!(seen.iter().filter(|&&s| s == o).count(), 1, "{o} in cycle from {start}");
        }
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn test_compute_rectangle_reference_corners() {
    let screen = Rect::new(0.0, 0.0, 1000.0, 800.0);
    let place = |o| compute_rectangle(o, &screen, Size::new(100.0, 20.0), Padding::uniform(10.0), MarginRatio::uniform(1.0));

    assert_eq!(place(Orientation::BottomRight), Rect::new(890.0, 10.0, 100.0, 20.0));
    assert_eq!(place(Orientation::TopLeft), Rect::new(10.0, 770.0, 100.0, 20.0));
}

#[test]
fn test_compute_rectangle_stays_inside_screen_for_every_corner() {
    for screen in screens() {
        for content in contents() {
            for orientation in Orientation::ALL {
                let rect = compute_rectangle(
                    orientation,
                    &screen,
                    content,
                    Padding::uniform(10.0),
                    MarginRatio::default(),
                );

                assert!(rect.min_x() >= screen.min_x(), "{orientation} left edge on {screen:?}");
                assert!(rect.max_x() <= screen.max_x(), "{orientation} right edge on {screen:?}");
                assert!(rect.min_y() >= screen.min_y(), "{orientation} bottom edge on {screen:?}");
                assert!(rect.max_y() <= screen.max_y(), "{orientation} top edge on {screen:?}");
            }
        }
    }
}

// ── Stick ─────────────────────────────────────────────────────────────────────

#[test]
fn test_dependent_width_ignores_its_own_content_width() {
    let params = PlacementParams::default();
    for screen in screens() {
        for orientation in Orientation::ALL {
            let pair = pair_on(screen, orientation, &params);
            assert_eq!(pair.dependent().frame().width, pair.primary().frame().width);
            assert_ne!(pair.dependent().frame().width, pair.dependent().content().width);
        }
    }
}

#[test]
fn test_dependent_side_follows_shared_orientation() {
    // Whole-point geometry meets exactly on both sides.
    let primary = Rect::new(500.0, 300.0, 120.0, 40.0);
    for orientation in Orientation::ALL {
        let dep = compute_dependent_rectangle(&primary, orientation, 16.0);
        if orientation.is_top() {
            assert_eq!(dep.y + dep.height, primary.y, "{orientation}");
        } else {
            assert_eq!(dep.y, primary.y + primary.height, "{orientation}");
        }
    }
}

#[test]
fn test_dependent_side_follows_shared_orientation_on_fractional_geometry() {
    // Scaled-font frames are rarely representable; top corners meet within ulps.
    let tolerance = |scale: f64| 4.0 * f64::EPSILON * scale.abs().max(1.0);
    for screen in screens() {
        for orientation in Orientation::ALL {
            let primary = compute_rectangle(
                orientation,
                &screen,
                Size::new(61.3, 26.4),
                Padding::uniform(10.1),
                MarginRatio::default(),
            );
            let dep = compute_dependent_rectangle(&primary, orientation, 17.7 * 1.3);

            if orientation.is_top() {
                let gap = (dep.y + dep.height - primary.y).abs();
                assert!(gap <= tolerance(primary.y), "{orientation} on {screen:?}: gap {gap}");
            } else {
                assert_eq!(dep.y, primary.y + primary.height, "{orientation} on {screen:?}");
            }
        }
    }
}

// ── Evasion on the pair ───────────────────────────────────────────────────────

#[test]
fn test_evade_changes_both_frames_and_keeps_stick_invariants() {
    // Arrange
    let params = PlacementParams {
        padding: Padding::uniform(8.0),
        margin: MarginRatio::uniform(1.0),
    };

    for screen in screens() {
        for start in Orientation::ALL {
            let mut pair = pair_on(screen, start, &params);
            let before = pair.frames();

            // Act
            let after = pair.evade(&screen, &params);

            // Assert
            assert_eq!(pair.orientation(), start.advance());
            assert_ne!(after.primary, before.primary, "primary moved from {start}");
            assert_ne!(after.dependent, before.dependent, "dependent moved from {start}");
            assert_eq!(after.dependent.width, after.primary.width);
            assert_eq!(pair.dependent().primary_handle(), Some(pair.primary().handle()));
        }
    }
}
