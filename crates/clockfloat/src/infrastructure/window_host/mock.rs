//! Recording window host for tests.
//!
//! `RecordingWindowHost` replaces every windowing call with in-memory
//! bookkeeping so assertions can inspect exactly which windows were created,
//! moved, relabelled, and closed, and in what order.  It also implements
//! [`ContentSurface`] using [`estimate_text_size`].
//!
//! # Failure injection
//!
//! [`fail_create_on`](RecordingWindowHost::fail_create_on) makes window
//! creation fail for one label on one display, which exercises the per-display
//! failure isolation of the display set.
//! [`set_fail_frames`](RecordingWindowHost::set_fail_frames) makes every frame
//! batch fail.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use clockfloat_core::{DisplayId, LabelKind, Rect, Size, WindowHandle};

use super::estimate_text_size;
use crate::application::host::{ContentSurface, HostError, WindowHost, WindowSpec};
use crate::application::labels::FontSpec;

#[derive(Debug, Default)]
struct Recorded {
    next_handle: u64,
    open: BTreeMap<WindowHandle, Rect>,
    created: Vec<(WindowHandle, WindowSpec)>,
    frame_batches: Vec<Vec<(WindowHandle, Rect)>>,
    shown: Vec<WindowHandle>,
    texts: Vec<(WindowHandle, String)>,
    closed: Vec<WindowHandle>,
    fail_create: HashSet<(DisplayId, LabelKind)>,
    fail_frames: bool,
}

/// A window host that records all calls without touching a display server.
#[derive(Debug, Default)]
pub struct RecordingWindowHost {
    state: Mutex<Recorded>,
}

impl RecordingWindowHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Recorded> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes `create_window` fail for `label` on `display` from now on.
    pub fn fail_create_on(&self, display: DisplayId, label: LabelKind) {
        self.state().fail_create.insert((display, label));
    }

    /// When `true`, every `set_frames` call fails and changes nothing.
    pub fn set_fail_frames(&self, fail: bool) {
        self.state().fail_frames = fail;
    }

    /// Successfully created windows, in creation order.
    pub fn created(&self) -> Vec<(WindowHandle, WindowSpec)> {
        self.state().created.clone()
    }

    /// Every accepted `set_frames` batch, in call order.
    pub fn frame_batches(&self) -> Vec<Vec<(WindowHandle, Rect)>> {
        self.state().frame_batches.clone()
    }

    pub fn shown(&self) -> Vec<WindowHandle> {
        self.state().shown.clone()
    }

    /// Every accepted `set_text` call, in call order.
    pub fn texts(&self) -> Vec<(WindowHandle, String)> {
        self.state().texts.clone()
    }

    /// Closed handles, in close order.  Unknown handles are not recorded.
    pub fn closed(&self) -> Vec<WindowHandle> {
        self.state().closed.clone()
    }

    /// Handles of windows that are created and not yet closed, ascending.
    pub fn open_windows(&self) -> Vec<WindowHandle> {
        self.state().open.keys().copied().collect()
    }

    /// The current frame of an open window.
    pub fn frame_of(&self, handle: WindowHandle) -> Option<Rect> {
        self.state().open.get(&handle).copied()
    }
}

impl WindowHost for RecordingWindowHost {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowHandle, HostError> {
        let mut state = self.state();
        if state.fail_create.contains(&(spec.display, spec.label)) {
            return Err(HostError::CreateFailed(format!(
                "scripted failure for {} label on {}",
                spec.label, spec.display
            )));
        }
        state.next_handle += 1;
        let handle = WindowHandle(state.next_handle);
        state.open.insert(handle, spec.frame);
        state.created.push((handle, spec.clone()));
        Ok(handle)
    }

    fn set_frames(&self, frames: &[(WindowHandle, Rect)]) -> Result<(), HostError> {
        let mut state = self.state();
        if state.fail_frames {
            return Err(HostError::Platform("scripted frame failure".into()));
        }
        if let Some((handle, _)) = frames.iter().find(|(h, _)| !state.open.contains_key(h)) {
            return Err(HostError::UnknownWindow(*handle));
        }
        for (handle, frame) in frames {
            state.open.insert(*handle, *frame);
        }
        state.frame_batches.push(frames.to_vec());
        Ok(())
    }

    fn show_window(&self, handle: WindowHandle) -> Result<(), HostError> {
        let mut state = self.state();
        if !state.open.contains_key(&handle) {
            return Err(HostError::UnknownWindow(handle));
        }
        state.shown.push(handle);
        Ok(())
    }

    fn set_text(&self, handle: WindowHandle, text: &str) -> Result<(), HostError> {
        let mut state = self.state();
        if !state.open.contains_key(&handle) {
            return Err(HostError::UnknownWindow(handle));
        }
        state.texts.push((handle, text.to_string()));
        Ok(())
    }

    fn close_window(&self, handle: WindowHandle) {
        let mut state = self.state();
        if state.open.remove(&handle).is_some() {
            state.closed.push(handle);
        }
    }
}

impl ContentSurface for RecordingWindowHost {
    fn natural_size(&self, text: &str, font: &FontSpec) -> Size {
        estimate_text_size(text, font)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
