//! Collaborator traits for the host windowing layer.
//!
//! The use cases never call a windowing toolkit directly.  They go through:
//!
//! - [`WindowHost`] – create, move, show, relabel, and close overlay windows.
//! - [`ContentSurface`] – measure the natural size of rendered label text.
//! - [`RefreshScheduler`] – start and stop a window's periodic text refresh.
//!
//! Asynchronous input from the host (pointer, drag, topology, timers) arrives
//! as [`HostEvent`] values on a single queue and is handled one at a time.

use std::time::Duration;

use clockfloat_core::{DisplayId, LabelKind, Point, Rect, Size, WindowHandle};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::labels::FontSpec;

/// Error type for host windowing operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    /// The platform refused to create a window or its backing surface.
    #[error("window could not be created: {0}")]
    CreateFailed(String),

    /// The handle does not refer to a live window.
    #[error("unknown window {0}")]
    UnknownWindow(WindowHandle),

    /// Any other platform failure.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Visual settings forwarded to the host without interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Opacity of the window background (0.0–1.0).
    pub background_alpha: f64,
    /// Opacity of the label text (0.0–1.0).
    pub text_alpha: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background_alpha: 0.25,
            text_alpha: 1.0 - 1.0 / 9.0,
        }
    }
}

/// Everything the host needs to create one overlay window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub label: LabelKind,
    pub display: DisplayId,
    pub frame: Rect,
    pub text: String,
    pub font: FontSpec,
    pub appearance: Appearance,
}

/// The host windowing layer.
///
/// Implementations create borderless, always-on-top windows that join every
/// workspace and report pointer entry through [`HostEvent::PointerEntered`].
#[cfg_attr(test, mockall::automock)]
pub trait WindowHost: Send + Sync {
    /// Creates a window (not yet visible) at `spec.frame`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::CreateFailed`] when the platform is out of window
    /// or surface resources.
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowHandle, HostError>;

    /// Applies all `frames` in one transaction so no intermediate state is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownWindow`] if any handle is not live.
    fn set_frames(&self, frames: &[(WindowHandle, Rect)]) -> Result<(), HostError>;

    /// Orders the window to the front and makes it visible.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownWindow`] if the handle is not live.
    fn show_window(&self, handle: WindowHandle) -> Result<(), HostError>;

    /// Replaces the label text shown by the window.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownWindow`] if the handle is not live.
    fn set_text(&self, handle: WindowHandle, text: &str) -> Result<(), HostError>;

    /// Closes the window and releases its resources.  Unknown handles are ignored.
    fn close_window(&self, handle: WindowHandle);
}

/// Measures rendered label text.
pub trait ContentSurface: Send + Sync {
    /// Returns the natural size of `text` rendered in `font`.
    fn natural_size(&self, text: &str, font: &FontSpec) -> Size;
}

/// Drives periodic label refresh.
///
/// Each tick must be delivered as [`HostEvent::RefreshDue`] carrying the
/// generation and handle passed to [`start`](RefreshScheduler::start).
pub trait RefreshScheduler: Send + Sync {
    /// Starts refreshing `handle` every `interval`.  Restarts an existing timer.
    fn start(&self, generation: Uuid, handle: WindowHandle, interval: Duration);

    /// Stops refreshing `handle`.  Safe to call for a handle with no timer.
    fn stop(&self, handle: WindowHandle);
}

/// Asynchronous input delivered by the host, processed one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The pointer entered the bounds of a window.
    PointerEntered(WindowHandle),
    /// The user dragged a window so its origin is now `origin`.
    WindowDragged { handle: WindowHandle, origin: Point },
    /// Displays were attached, detached, or rearranged.
    TopologyChanged,
    /// A window's refresh interval elapsed.
    RefreshDue { generation: Uuid, handle: WindowHandle },
    /// The application is quitting.
    Shutdown,
}
