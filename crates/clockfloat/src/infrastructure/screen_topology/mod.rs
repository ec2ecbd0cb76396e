//! Display enumeration adapters.
//!
//! The shipped binary has no native display backend; it reads a static display
//! list from the configuration file through [`StaticScreenTopology`].
//!
//! [`ScriptedScreenTopology`] is always compiled (not guarded by `#[cfg]`) so
//! tests can attach, detach, and break displays between events.

use std::sync::{Mutex, PoisonError};

use clockfloat_core::{Display, Rect};

use crate::application::display_set::{ScreenTopology, TopologyError};

/// A topology that never changes.
#[derive(Debug, Clone)]
pub struct StaticScreenTopology {
    displays: Vec<Display>,
}

impl StaticScreenTopology {
    pub fn new(displays: Vec<Display>) -> Self {
        Self { displays }
    }
}

impl ScreenTopology for StaticScreenTopology {
    fn current_displays(&self) -> Result<Vec<Display>, TopologyError> {
        Ok(self.displays.clone())
    }
}

/// A topology whose display list can be replaced at any time.
///
/// # Example
///
/// ```ignore
/// let topology = ScriptedScreenTopology::dual_1080p();
/// manager.initialize_from_topology()?;
///
/// topology.set_displays(vec![ScriptedScreenTopology::display_1080p(1)]);
/// manager.handle_event(HostEvent::TopologyChanged);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedScreenTopology {
    displays: Mutex<Vec<Display>>,
    should_fail: Mutex<bool>,
}

impl ScriptedScreenTopology {
    pub fn new(displays: Vec<Display>) -> Self {
        Self {
            displays: Mutex::new(displays),
            should_fail: Mutex::new(false),
        }
    }

    /// One 1920×1080 display with id 0.
    pub fn single_1080p() -> Self {
        Self::new(vec![Self::display_1080p(0)])
    }

    /// Two 1920×1080 displays side by side, ids 0 and 1.
    pub fn dual_1080p() -> Self {
        Self::new(vec![Self::display_1080p(0), Self::display_1080p(1)])
    }

    /// A 1920×1080 display placed `id` widths to the right of the origin.
    pub fn display_1080p(id: u32) -> Display {
        Display::new(id, Rect::new(1920.0 * f64::from(id), 0.0, 1920.0, 1080.0))
    }

    /// Replaces the attached displays.
    pub fn set_displays(&self, displays: Vec<Display>) {
        *self.displays.lock().unwrap_or_else(PoisonError::into_inner) = displays;
    }

    /// When `true`, every query fails with [`TopologyError::Platform`].
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap_or_else(PoisonError::into_inner) = fail;
    }
}

impl ScreenTopology for ScriptedScreenTopology {
    fn current_displays(&self) -> Result<Vec<Display>, TopologyError> {
        if *self.should_fail.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(TopologyError::Platform("scripted failure".into()));
        }
        Ok(self.displays.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
