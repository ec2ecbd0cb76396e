//! # clockfloat-core
//!
//! Domain model for ClockFloat's floating clock and date labels: where each
//! overlay window sits on its display, how the corner it is anchored to
//! advances when the pointer comes near, and how the date label stays stuck to
//! the time label.
//!
//! This crate has zero dependencies on OS APIs, windowing toolkits, or async
//! runtimes.  Every function here is pure geometry over plain data, so the
//! application layer can call it from any event loop and tests can call it
//! without a display.
//!
//! # Architecture overview
//!
//! - **`domain::geometry`** – `Rect`, `Size`, and `Point` in a bottom-left
//!   origin coordinate space (y grows upward).
//!
//! - **`domain::orientation`** – the four screen corners as an exhaustive
//!   enum that cycles TopLeft → TopRight → BottomRight → BottomLeft.
//!
//! - **`domain::placement`** – computes a window's rectangle from its corner,
//!   the display's usable area, its content size, padding, and margins.
//!
//! - **`domain::stick`** – derives a dependent window's rectangle from its
//!   primary's rectangle and shared orientation.
//!
//! - **`domain::window`** – `OverlayWindow` and `WindowPair`, the data model
//!   that owns orientation state and applies evasion to both windows at once.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `clockfloat_core::WindowPair` instead of `clockfloat_core::domain::window::WindowPair`.
pub use domain::geometry::{Point, Rect, Size};
pub use domain::orientation::{Orientation, OrientationParseError};
pub use domain::placement::{compute_rectangle, frame_size, MarginRatio, Padding, PlacementParams};
pub use domain::stick::{compute_dependent_rectangle, dependent_height};
pub use domain::window::{
    Display, DisplayId, LabelKind, OverlayWindow, PairFrames, WindowHandle, WindowPair,
    WindowRole,
};
