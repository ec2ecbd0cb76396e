//! EvasionController: moves a label pair out of the pointer's way.
//!
//! When the pointer enters a label, the pair it belongs to advances to the
//! next corner of its display.  Only the primary owns a corner; an event on
//! the dependent is forwarded to its primary, so entering either label has
//! the same effect.
//!
//! Both new frames are computed on a copy of the pair, submitted to the host
//! in a single [`WindowHost::set_frames`] batch, and committed to the registry
//! only once the host accepted them.  The pair is never observed half-moved.

use std::sync::Arc;

use clockfloat_core::{
    Display, DisplayId, Orientation, PairFrames, PlacementParams, Point, Rect, WindowHandle,
    WindowPair,
};
use tracing::debug;

use super::display_set::{DisplayRegistry, DisplaySetError};
use super::host::WindowHost;

/// What a pointer or drag event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvasionOutcome {
    /// Both windows of the pair moved in one batch.
    Moved {
        display: DisplayId,
        orientation: Orientation,
        frames: PairFrames,
    },
    /// The window does not dodge the pointer; nothing changed.
    Disabled,
    /// No live window has this handle (e.g. it belonged to a torn-down set).
    UnknownWindow,
}

/// Coordinates evasion and manual repositioning for every pair.
pub struct EvasionController {
    host: Arc<dyn WindowHost>,
    params: PlacementParams,
}

impl EvasionController {
    pub fn new(host: Arc<dyn WindowHost>, params: PlacementParams) -> Self {
        Self { host, params }
    }

    /// Handles the pointer entering `handle`.
    ///
    /// `displays` is the current topology; the pair is re-placed on its
    /// display's current usable area.
    ///
    /// # Errors
    ///
    /// - [`DisplaySetError::MissingDisplay`] if the pair's display is no
    ///   longer attached.  The registry is left untouched; the caller decides
    ///   how to dispose of the stale pair.
    /// - [`DisplaySetError::ResourceUnavailable`] if the host rejected the move.
    pub fn on_pointer_entered(
        &self,
        registry: &mut DisplayRegistry,
        displays: &[Display],
        handle: WindowHandle,
    ) -> Result<EvasionOutcome, DisplaySetError> {
        let Some(pair) = registry.pair_for_window_mut(handle) else {
            debug!(%handle, "pointer entered unknown window");
            return Ok(EvasionOutcome::UnknownWindow);
        };

        let window = if pair.primary().handle() == handle {
            pair.primary()
        } else {
            pair.dependent()
        };

        if !window.dodges_pointer() {
            return Ok(EvasionOutcome::Disabled);
        }
        if let Some(primary) = window.primary_handle() {
            debug!(%handle, %primary, "forwarding evasion to primary");
        }

        let screen = usable_area(displays, pair.display().id)?;
        let mut next = pair.clone();
        let frames = next.evade(&screen, &self.params);
        self.commit(pair, next, frames)
    }

    /// Handles a drag that left window `handle` with its origin at `origin`.
    ///
    /// Dragging is allowed regardless of the dodge setting and keeps the
    /// current orientation.
    ///
    /// # Errors
    ///
    /// Same as [`on_pointer_entered`](Self::on_pointer_entered).
    pub fn on_window_dragged(
        &self,
        registry: &mut DisplayRegistry,
        displays: &[Display],
        handle: WindowHandle,
        origin: Point,
    ) -> Result<EvasionOutcome, DisplaySetError> {
        let Some(pair) = registry.pair_for_window_mut(handle) else {
            debug!(%handle, "drag on unknown window");
            return Ok(EvasionOutcome::UnknownWindow);
        };

        usable_area(displays, pair.display().id)?;
        let mut next = pair.clone();
        let Some(frames) = next.drag(handle, origin) else {
            return Ok(EvasionOutcome::UnknownWindow);
        };
        self.commit(pair, next, frames)
    }

    fn commit(
        &self,
        pair: &mut WindowPair,
        next: WindowPair,
        frames: PairFrames,
    ) -> Result<EvasionOutcome, DisplaySetError> {
        let [primary, dependent] = next.handles();
        let display_id = next.display().id;

        self.host
            .set_frames(&[(primary, frames.primary), (dependent, frames.dependent)])
            .map_err(|source| DisplaySetError::ResourceUnavailable {
                display: display_id,
                source,
            })?;

        let orientation = next.orientation();
        *pair = next;
        debug!(display = %display_id, %orientation, "pair re-placed");

        Ok(EvasionOutcome::Moved {
            display: display_id,
            orientation,
            frames,
        })
    }
}

/// Looks up the usable area of `display` in the current topology.
fn usable_area(displays: &[Display], display: DisplayId) -> Result<Rect, DisplaySetError> {
    displays
        .iter()
        .find(|d| d.id == display)
        .map(|d| d.usable)
        .ok_or(DisplaySetError::MissingDisplay(display))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host::{HostError, MockWindowHost};
    use clockfloat_core::{LabelKind, MarginRatio, OverlayWindow, Padding, Size};

    fn params() -> PlacementParams {
        PlacementParams {
            padding: Padding::uniform(10.0),
            margin: MarginRatio::uniform(1.0),
        }
    }

    fn display() -> Display {
        Display::new(0, Rect::new(0.0, 0.0, 1000.0, 800.0))
    }

    fn registry_with_pair(dodges: bool) -> DisplayRegistry {
        let display = display();
        let time = Size::new(100.0, 40.0);
        let date = Size::new(90.0, 20.0);
        let orientation = Orientation::BottomRight;
        let frames = WindowPair::layout(orientation, &display.usable, time, date, &params());
        let primary = OverlayWindow::primary(
            WindowHandle(1),
            LabelKind::Time,
            display.id,
            time,
            frames.primary,
            dodges,
        );
        let dependent = OverlayWindow::dependent_of(
            &primary,
            WindowHandle(2),
            LabelKind::Date,
            date,
            frames.dependent,
        );

        let mut registry = DisplayRegistry::new();
        registry.insert(WindowPair::new(display, orientation, primary, dependent));
        registry
    }

    fn expect_one_batch(host: &mut MockWindowHost) {
        host.expect_set_frames()
            .withf(|frames| {
                frames.len() == 2 && frames[0].0 == WindowHandle(1) && frames[1].0 == WindowHandle(2)
            })
            .times(1)
            .returning(|_| Ok(()));
    }

    // ── on_pointer_entered ────────────────────────────────────────────────────

    #[test]
    fn test_pointer_on_primary_moves_both_windows_in_one_batch() {
        // Arrange
        let mut host = MockWindowHost::new();
        expect_one_batch(&mut host);
        let controller = EvasionController::new(Arc::new(host), params());
        let mut registry = registry_with_pair(true);

        // Act
        let outcome = controller
            .on_pointer_entered(&mut registry, &[display()], WindowHandle(1))
            .expect("evade");

        // Assert
        let pair = registry.get(DisplayId(0)).expect("pair");
        assert_eq!(pair.orientation(), Orientation::BottomLeft);
        assert_eq!(pair.primary().frame(), Rect::new(10.0, 10.0, 100.0, 40.0));
        assert_eq!(pair.dependent().frame(), Rect::new(10.0, 50.0, 100.0, 20.0));
        assert!(matches!(outcome, EvasionOutcome::Moved { orientation: Orientation::BottomLeft, .. }));
    }

    #[test]
    fn test_pointer_on_dependent_is_forwarded_to_primary() {
        // Arrange: two identical registries, one entered via each window
        let mut via_primary = registry_with_pair(true);
        let mut via_dependent = registry_with_pair(true);
        let mut host = MockWindowHost::new();
        host.expect_set_frames().times(2).returning(|_| Ok(()));
        let controller = EvasionController::new(Arc::new(host), params());

        // Act
        let a = controller
            .on_pointer_entered(&mut via_primary, &[display()], WindowHandle(1))
            .expect("primary");
        let b = controller
            .on_pointer_entered(&mut via_dependent, &[display()], WindowHandle(2))
            .expect("dependent");

        // Assert
        assert_eq!(a, b);
        assert_eq!(via_primary.get(DisplayId(0)), via_dependent.get(DisplayId(0)));
    }

    #[test]
    fn test_pointer_ignored_when_dodging_disabled() {
        // Arrange: any call to set_frames would panic the mock
        let host = MockWindowHost::new();
        let controller = EvasionController::new(Arc::new(host), params());
        let mut registry = registry_with_pair(false);
        let before = registry.get(DisplayId(0)).cloned();

        // Act
        for handle in [WindowHandle(1), WindowHandle(2), WindowHandle(1)] {
            let outcome = controller
                .on_pointer_entered(&mut registry, &[display()], handle)
                .expect("no error");
            assert_eq!(outcome, EvasionOutcome::Disabled);
        }

        // Assert
        assert_eq!(registry.get(DisplayId(0)).cloned(), before);
    }

    #[test]
    fn test_pointer_on_unknown_handle_reports_unknown_window() {
        let controller = EvasionController::new(Arc::new(MockWindowHost::new()), params());
        let mut registry = registry_with_pair(true);

        let outcome = controller
            .on_pointer_entered(&mut registry, &[display()], WindowHandle(42))
            .expect("no error");

        assert_eq!(outcome, EvasionOutcome::UnknownWindow);
    }

    #[test]
    fn test_pointer_on_detached_display_returns_missing_display() {
        let controller = EvasionController::new(Arc::new(MockWindowHost::new()), params());
        let mut registry = registry_with_pair(true);

        let result = controller.on_pointer_entered(&mut registry, &[], WindowHandle(1));

        assert_eq!(result, Err(DisplaySetError::MissingDisplay(DisplayId(0))));
    }

    #[test]
    fn test_host_rejection_leaves_pair_unchanged() {
        // Arrange
        let mut host = MockWindowHost::new();
        host.expect_set_frames()
            .times(1)
            .returning(|_| Err(HostError::Platform("compositor gone".to_string())));
        let controller = EvasionController::new(Arc::new(host), params());
        let mut registry = registry_with_pair(true);
        let before = registry.get(DisplayId(0)).cloned();

        // Act
        let result = controller.on_pointer_entered(&mut registry, &[display()], WindowHandle(1));

        // Assert
        assert!(matches!(result, Err(DisplaySetError::ResourceUnavailable { .. })));
        assert_eq!(registry.get(DisplayId(0)).cloned(), before);
    }

    #[test]
    fn test_pointer_uses_current_display_geometry() {
        // Arrange: the display grew since the pair was placed
        let mut host = MockWindowHost::new();
        host.expect_set_frames().times(2).returning(|_| Ok(()));
        let controller = EvasionController::new(Arc::new(host), params());
        let mut registry = registry_with_pair(true);
        let grown = Display::new(0, Rect::new(0.0, 0.0, 2000.0, 1000.0));

        // Act: bottom-right -> bottom-left -> top-left
        for _ in 0..2 {
            controller
                .on_pointer_entered(&mut registry, &[grown.clone()], WindowHandle(1))
                .expect("evade");
        }

        // Assert
        let pair = registry.get(DisplayId(0)).expect("pair");
        assert_eq!(pair.orientation(), Orientation::TopLeft);
        assert_eq!(pair.primary().frame().origin(), Point::new(10.0, 950.0));
    }

    // ── on_window_dragged ─────────────────────────────────────────────────────

    #[test]
    fn test_drag_moves_pair_even_when_dodging_disabled() {
        let mut host = MockWindowHost::new();
        expect_one_batch(&mut host);
        let controller = EvasionController::new(Arc::new(host), params());
        let mut registry = registry_with_pair(false);

        let outcome = controller
            .on_window_dragged(&mut registry, &[display()], WindowHandle(1), Point::new(400.0, 300.0))
            .expect("drag");

        let pair = registry.get(DisplayId(0)).expect("pair");
        assert_eq!(pair.primary().frame().origin(), Point::new(400.0, 300.0));
        assert_eq!(pair.dependent().frame().y, 340.0);
        assert!(matches!(outcome, EvasionOutcome::Moved { orientation: Orientation::BottomRight, .. }));
    }
}
