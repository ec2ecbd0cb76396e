//! Headless window host.
//!
//! Keeps every window's frame and text in memory and logs each operation
//! through `tracing`.  The binary runs on it when no native overlay backend
//! is linked; `RUST_LOG=clockfloat=debug` shows every move and relabel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use clockfloat_core::{Rect, Size, WindowHandle};
use tracing::{debug, info, trace};

use super::estimate_text_size;
use crate::application::host::{ContentSurface, HostError, WindowHost, WindowSpec};
use crate::application::labels::FontSpec;

#[derive(Debug, Clone)]
struct HeadlessWindow {
    spec: WindowSpec,
    visible: bool,
}

/// An in-memory [`WindowHost`] that only logs.
#[derive(Debug, Default)]
pub struct HeadlessWindowHost {
    next_handle: AtomicU64,
    windows: Mutex<HashMap<WindowHandle, HeadlessWindow>>,
}

impl HeadlessWindowHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn windows(&self) -> MutexGuard<'_, HashMap<WindowHandle, HeadlessWindow>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of windows created and not yet closed.
    pub fn window_count(&self) -> usize {
        self.windows().len()
    }

    pub fn frame_of(&self, handle: WindowHandle) -> Option<Rect> {
        self.windows().get(&handle).map(|w| w.spec.frame)
    }

    pub fn text_of(&self, handle: WindowHandle) -> Option<String> {
        self.windows().get(&handle).map(|w| w.spec.text.clone())
    }

    pub fn is_visible(&self, handle: WindowHandle) -> bool {
        self.windows().get(&handle).is_some_and(|w| w.visible)
    }
}

impl WindowHost for HeadlessWindowHost {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowHandle, HostError> {
        let handle = WindowHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        debug!(
            %handle,
            label = %spec.label,
            display = %spec.display,
            frame = ?spec.frame,
            font = %spec.font.family,
            points = spec.font.points,
            "window created"
        );
        self.windows().insert(
            handle,
            HeadlessWindow {
                spec: spec.clone(),
                visible: false,
            },
        );
        Ok(handle)
    }

    fn set_frames(&self, frames: &[(WindowHandle, Rect)]) -> Result<(), HostError> {
        let mut windows = self.windows();
        if let Some((handle, _)) = frames.iter().find(|(h, _)| !windows.contains_key(h)) {
            return Err(HostError::UnknownWindow(*handle));
        }
        for (handle, frame) in frames {
            if let Some(window) = windows.get_mut(handle) {
                window.spec.frame = *frame;
            }
            debug!(%handle, ?frame, "window moved");
        }
        Ok(())
    }

    fn show_window(&self, handle: WindowHandle) -> Result<(), HostError> {
        let mut windows = self.windows();
        let window = windows
            .get_mut(&handle)
            .ok_or(HostError::UnknownWindow(handle))?;
        window.visible = true;
        info!(%handle, label = %window.spec.label, text = %window.spec.text, "window shown");
        Ok(())
    }

    fn set_text(&self, handle: WindowHandle, text: &str) -> Result<(), HostError> {
        let mut windows = self.windows();
        let window = windows
            .get_mut(&handle)
            .ok_or(HostError::UnknownWindow(handle))?;
        if window.spec.text != text {
            trace!(%handle, text, "label text changed");
            window.spec.text = text.to_string();
        }
        Ok(())
    }

    fn close_window(&self, handle: WindowHandle) {
        if self.windows().remove(&handle).is_some() {
            debug!(%handle, "window closed");
        }
    }
}

impl ContentSurface for HeadlessWindowHost {
    fn natural_size(&self, text: &str, font: &FontSpec) -> Size {
        estimate_text_size(text, font)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
