//! Overlay windows, displays, and the primary/dependent pair.
//!
//! A [`WindowPair`] holds one primary window (the time label) and one
//! dependent window (the date label) on a single display.  The pair holds the
//! one orientation both windows are placed from; neither window carries a
//! corner of its own.
//!
//! The references between the two windows are [`WindowHandle`] values, not
//! pointers.  Neither window owns the other: the pair owns both, and whoever
//! owns the pair (the display-set registry) decides when both are released.
//!
//! # Construction order
//!
//! ```text
//! WindowPair::layout()          -- frames for both windows, no host windows yet
//! OverlayWindow::primary()      -- primary exists first
//! OverlayWindow::dependent_of() -- needs &primary for its back-reference
//! WindowPair::new()             -- links primary ↔ dependent, records the corner
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{Point, Rect, Size};
use super::orientation::Orientation;
use super::placement::{compute_rectangle, PlacementParams};
use super::stick::{compute_dependent_rectangle, dependent_height};

/// Identifies a physical display.  Stable for as long as the monitor stays attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(pub u32);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display-{}", self.0)
    }
}

/// A snapshot of one attached display.
///
/// Snapshots are never mutated; a topology change replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub id: DisplayId,
    /// Area available to overlay windows, in global display coordinates.
    pub usable: Rect,
}

impl Display {
    pub fn new(id: u32, usable: Rect) -> Self {
        Self { id: DisplayId(id), usable }
    }
}

/// Opaque handle issued by the host windowing layer for a created window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Which label a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Time,
    Date,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Time => f.write_str("time"),
            LabelKind::Date => f.write_str("date"),
        }
    }
}

/// Whether a window positions itself or follows another window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    /// Placed directly from display geometry.
    Primary {
        /// Back-reference to the window stuck to this one, if any.
        dependent: Option<WindowHandle>,
    },
    /// Placed relative to `primary`; has no orientation of its own.
    Dependent { primary: WindowHandle },
}

/// One placed overlay rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayWindow {
    handle: WindowHandle,
    label: LabelKind,
    display: DisplayId,
    frame: Rect,
    content: Size,
    dodges_pointer: bool,
    role: WindowRole,
}

impl OverlayWindow {
    /// Creates a primary window with nothing stuck to it yet.
    pub fn primary(
        handle: WindowHandle,
        label: LabelKind,
        display: DisplayId,
        content: Size,
        frame: Rect,
        dodges_pointer: bool,
    ) -> Self {
        Self {
            handle,
            label,
            display,
            frame,
            content,
            dodges_pointer,
            role: WindowRole::Primary { dependent: None },
        }
    }

    /// Creates a window stuck to `primary`.
    ///
    /// The dependent shares the primary's display and pointer behaviour.
    pub fn dependent_of(
        primary: &OverlayWindow,
        handle: WindowHandle,
        label: LabelKind,
        content: Size,
        frame: Rect,
    ) -> Self {
        Self {
            handle,
            label,
            display: primary.display,
            frame,
            content,
            dodges_pointer: primary.dodges_pointer,
            role: WindowRole::Dependent { primary: primary.handle },
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn label(&self) -> LabelKind {
        self.label
    }

    pub fn display(&self) -> DisplayId {
        self.display
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Natural size of the rendered label, before margins.
    pub fn content(&self) -> Size {
        self.content
    }

    pub fn dodges_pointer(&self) -> bool {
        self.dodges_pointer
    }

    pub fn role(&self) -> WindowRole {
        self.role
    }

    /// The window this one is stuck to, if any.
    pub fn primary_handle(&self) -> Option<WindowHandle> {
        match self.role {
            WindowRole::Primary { .. } => None,
            WindowRole::Dependent { primary } => Some(primary),
        }
    }

    /// The window stuck to this one, if any.
    pub fn dependent_handle(&self) -> Option<WindowHandle> {
        match self.role {
            WindowRole::Primary { dependent } => dependent,
            WindowRole::Dependent { .. } => None,
        }
    }
}

/// Frames for both windows of a pair, applied to the host together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairFrames {
    pub primary: Rect,
    pub dependent: Rect,
}

/// A primary window and the single dependent stuck to it, on one display.
///
/// One dependent per primary is a modelling choice of this type rather than a
/// limit of the stick relation, which is a pure function of the primary frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPair {
    display: Display,
    orientation: Orientation,
    primary: OverlayWindow,
    dependent: OverlayWindow,
}

impl WindowPair {
    /// Computes initial frames for a pair before any host window exists.
    pub fn layout(
        orientation: Orientation,
        screen: &Rect,
        primary_content: Size,
        dependent_content: Size,
        params: &PlacementParams,
    ) -> PairFrames {
        let primary = compute_rectangle(
            orientation,
            screen,
            primary_content,
            params.padding,
            params.margin,
        );
        let dependent = compute_dependent_rectangle(
            &primary,
            orientation,
            dependent_height(dependent_content, params.margin),
        );
        PairFrames { primary, dependent }
    }

    /// Takes ownership of both windows, anchored to `orientation`.
    ///
    /// The roles are assigned here: `primary` becomes the independent window
    /// referencing `dependent`, and `dependent` follows `primary` on its
    /// display with its pointer behaviour.
    pub fn new(
        display: Display,
        orientation: Orientation,
        mut primary: OverlayWindow,
        mut dependent: OverlayWindow,
    ) -> Self {
        debug_assert_eq!(primary.display, display.id);

        primary.role = WindowRole::Primary {
            dependent: Some(dependent.handle),
        };
        dependent.role = WindowRole::Dependent {
            primary: primary.handle,
        };
        dependent.display = primary.display;
        dependent.dodges_pointer = primary.dodges_pointer;

        Self {
            display,
            orientation,
            primary,
            dependent,
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn primary(&self) -> &OverlayWindow {
        &self.primary
    }

    pub fn dependent(&self) -> &OverlayWindow {
        &self.dependent
    }

    /// The corner both windows are placed from.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn frames(&self) -> PairFrames {
        PairFrames {
            primary: self.primary.frame,
            dependent: self.dependent.frame,
        }
    }

    /// Returns both handles, primary first.
    pub fn handles(&self) -> [WindowHandle; 2] {
        [self.primary.handle, self.dependent.handle]
    }

    /// Anchors the pair to `orientation` on `screen` and returns the new frames.
    pub fn place(
        &mut self,
        orientation: Orientation,
        screen: &Rect,
        params: &PlacementParams,
    ) -> PairFrames {
        let frames = Self::layout(
            orientation,
            screen,
            self.primary.content,
            self.dependent.content,
            params,
        );
        self.orientation = orientation;
        self.apply(frames);
        frames
    }

    /// Advances to the next corner and re-places both windows.
    pub fn evade(&mut self, screen: &Rect, params: &PlacementParams) -> PairFrames {
        let from = self.orientation();
        let to = from.advance();
        trace!(primary = %self.primary.handle, %from, %to, "advancing orientation");
        self.place(to, screen, params)
    }

    /// Moves the pair so the window `handle` has its origin at `origin`.
    ///
    /// The primary moves by the drag delta and the dependent is re-derived
    /// from it; the orientation is unchanged.  Returns `None` if `handle` does
    /// not belong to this pair.
    pub fn drag(&mut self, handle: WindowHandle, origin: Point) -> Option<PairFrames> {
        let current = self.primary.frame;
        let primary = if handle == self.primary.handle {
            Rect::new(origin.x, origin.y, current.width, current.height)
        } else if handle == self.dependent.handle {
            let from = self.dependent.frame;
            current.translated(origin.x - from.x, origin.y - from.y)
        } else {
            return None;
        };

        let dependent =
            compute_dependent_rectangle(&primary, self.orientation(), self.dependent.frame.height);
        let frames = PairFrames { primary, dependent };
        self.apply(frames);
        Some(frames)
    }

    fn apply(&mut self, frames: PairFrames) {
        self.primary.frame = frames.primary;
        self.dependent.frame = frames.dependent;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
