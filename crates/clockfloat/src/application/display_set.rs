//! DisplaySetManager: one time/date pair per attached display.
//!
//! The manager owns every [`WindowPair`] through a [`DisplayRegistry`] keyed by
//! display.  It builds the whole set from a topology snapshot, rebuilds it from
//! scratch when the topology changes, and releases every window (timers first,
//! then host windows) on teardown.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize_all──► Initialized ──teardown_all──► TornDown
//!                                     ▲     │                       │
//!                                     └─────┴──────initialize_all───┘
//! ```
//!
//! Every `initialize_all` starts a new generation.  Refresh ticks carry the
//! generation that scheduled them, so a tick that was already queued when the
//! set was rebuilt is recognised as stale and dropped.
//!
//! # Failure isolation
//!
//! A host failure while building one display's pair is recorded in the
//! [`InitReport`] and the remaining displays are still built.  A half-built
//! pair is closed before moving on, so no window is left without an owner.

use std::collections::{BTreeMap, HashMap};
use std::ops::ControlFlow;
use std::sync::Arc;

use clockfloat_core::{
    Display, DisplayId, LabelKind, Orientation, OverlayWindow, PlacementParams, Point,
    WindowHandle, WindowPair,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::evasion::{EvasionController, EvasionOutcome};
use super::host::{
    Appearance, ContentSurface, HostError, HostEvent, RefreshScheduler, WindowHost, WindowSpec,
};
use super::labels::{LabelStyles, TimeSource};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error returned when the attached displays cannot be enumerated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("display enumeration failed: {0}")]
    Platform(String),
}

/// Error type for display-set operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DisplaySetError {
    /// The host could not provide a window for this display.
    #[error("host resources unavailable on {display}: {source}")]
    ResourceUnavailable {
        display: DisplayId,
        #[source]
        source: HostError,
    },

    /// The pair's display is no longer attached.
    #[error("{0} is no longer attached")]
    MissingDisplay(DisplayId),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

// ── Collaborator traits ───────────────────────────────────────────────────────

/// Enumerates the currently attached displays.
///
/// Change notification is delivered separately as
/// [`HostEvent::TopologyChanged`]; the consumer re-queries on receipt.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenTopology: Send + Sync {
    /// Returns a fresh snapshot of every attached display.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Platform`] if the platform query fails.
    fn current_displays(&self) -> Result<Vec<Display>, TopologyError>;
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// The live pairs, keyed by display, with a reverse index from window handle.
#[derive(Debug, Default)]
pub struct DisplayRegistry {
    pairs: BTreeMap<DisplayId, WindowPair>,
    owners: HashMap<WindowHandle, DisplayId>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pair`, returning any pair it replaced on the same display.
    pub fn insert(&mut self, pair: WindowPair) -> Option<WindowPair> {
        let display = pair.display().id;
        let replaced = self.remove(display);
        for handle in pair.handles() {
            self.owners.insert(handle, display);
        }
        self.pairs.insert(display, pair);
        replaced
    }

    pub fn remove(&mut self, display: DisplayId) -> Option<WindowPair> {
        let pair = self.pairs.remove(&display)?;
        for handle in pair.handles() {
            self.owners.remove(&handle);
        }
        Some(pair)
    }

    /// Removes every pair, in display order.
    pub fn drain(&mut self) -> Vec<WindowPair> {
        self.owners.clear();
        std::mem::take(&mut self.pairs).into_values().collect()
    }

    pub fn get(&self, display: DisplayId) -> Option<&WindowPair> {
        self.pairs.get(&display)
    }

    /// The pair that `handle` belongs to, as primary or dependent.
    pub fn pair_for_window(&self, handle: WindowHandle) -> Option<&WindowPair> {
        self.owners.get(&handle).and_then(|d| self.pairs.get(d))
    }

    pub fn pair_for_window_mut(&mut self, handle: WindowHandle) -> Option<&mut WindowPair> {
        let display = self.owners.get(&handle)?;
        self.pairs.get_mut(display)
    }

    pub fn window(&self, handle: WindowHandle) -> Option<&OverlayWindow> {
        let pair = self.pair_for_window(handle)?;
        if pair.primary().handle() == handle {
            Some(pair.primary())
        } else {
            Some(pair.dependent())
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = &WindowPair> {
        self.pairs.values()
    }

    pub fn displays(&self) -> impl Iterator<Item = DisplayId> + '_ {
        self.pairs.keys().copied()
    }

    pub fn contains_display(&self, display: DisplayId) -> bool {
        self.pairs.contains_key(&display)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Where a [`DisplaySetManager`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Uninitialized,
    Initialized,
    TornDown,
}

/// Read-only settings shared by every pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    pub labels: LabelStyles,
    pub placement: PlacementParams,
    pub initial_corner: Orientation,
    pub dodge_pointer: bool,
    pub appearance: Appearance,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            labels: LabelStyles::default(),
            placement: PlacementParams::default(),
            initial_corner: Orientation::default(),
            dodge_pointer: true,
            appearance: Appearance::default(),
        }
    }
}

/// Host-side services the manager drives.
#[derive(Clone)]
pub struct Collaborators {
    pub topology: Arc<dyn ScreenTopology>,
    pub host: Arc<dyn WindowHost>,
    pub surface: Arc<dyn ContentSurface>,
    pub scheduler: Arc<dyn RefreshScheduler>,
    pub clock: Arc<dyn TimeSource>,
}

/// Outcome of one [`DisplaySetManager::initialize_all`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct InitReport {
    pub generation: Uuid,
    /// Displays that received a pair, in topology order.
    pub created: Vec<DisplayId>,
    /// Displays that were skipped, with the reason.
    pub failed: Vec<(DisplayId, DisplaySetError)>,
}

impl InitReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owns every overlay pair and routes host events to them.
pub struct DisplaySetManager {
    settings: OverlaySettings,
    services: Collaborators,
    evasion: EvasionController,
    registry: DisplayRegistry,
    state: ManagerState,
    generation: Option<Uuid>,
}

impl DisplaySetManager {
    pub fn new(settings: OverlaySettings, services: Collaborators) -> Self {
        let evasion = EvasionController::new(Arc::clone(&services.host), settings.placement);
        Self {
            settings,
            services,
            evasion,
            registry: DisplayRegistry::new(),
            state: ManagerState::Uninitialized,
            generation: None,
        }
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// The current generation, or `None` before the first initialization and
    /// after teardown.
    pub fn generation(&self) -> Option<Uuid> {
        self.generation
    }

    pub fn registry(&self) -> &DisplayRegistry {
        &self.registry
    }

    /// Builds one pair per display, tearing down any existing set first.
    ///
    /// Displays are processed in the given order; a repeated display id is
    /// skipped.  Failures are per display and reported, never propagated.
    pub fn initialize_all(&mut self, displays: &[Display]) -> InitReport {
        self.teardown_all();

        let generation = Uuid::new_v4();
        self.generation = Some(generation);
        self.state = ManagerState::Initialized;

        let mut created = Vec::with_capacity(displays.len());
        let mut failed = Vec::new();

        for display in displays {
            let display_id = display.id;
            if self.registry.contains_display(display_id) {
                warn!(display = %display_id, "duplicate display in topology, skipping");
                continue;
            }
            match self.build_pair(display, generation) {
                Ok(pair) => {
                    self.registry.insert(pair);
                    created.push(display_id);
                }
                Err(e) => {
                    warn!(display = %display_id, error = %e, "could not create overlay pair");
                    failed.push((display_id, e));
                }
            }
        }

        info!(
            %generation,
            created = created.len(),
            failed = failed.len(),
            "display set initialized"
        );

        InitReport {
            generation,
            created,
            failed,
        }
    }

    /// Queries the topology and initializes from the result.
    ///
    /// # Errors
    ///
    /// Returns [`DisplaySetError::Topology`] if the displays cannot be
    /// enumerated; the existing set is left in place.
    pub fn initialize_from_topology(&mut self) -> Result<InitReport, DisplaySetError> {
        let displays = self.services.topology.current_displays()?;
        Ok(self.initialize_all(&displays))
    }

    /// Rebuilds the whole set after a topology change.
    ///
    /// Pairs on surviving displays are recreated rather than reused, so their
    /// orientation returns to the configured initial corner.
    ///
    /// # Errors
    ///
    /// Same as [`initialize_from_topology`](Self::initialize_from_topology).
    pub fn handle_topology_changed(&mut self) -> Result<InitReport, DisplaySetError> {
        info!("display topology changed, rebuilding overlay set");
        self.initialize_from_topology()
    }

    /// Stops every refresh timer and closes every window.  Safe to repeat.
    pub fn teardown_all(&mut self) {
        let pairs = self.registry.drain();
        if !pairs.is_empty() {
            info!(pairs = pairs.len(), "tearing down display set");
        }
        for pair in &pairs {
            self.release(pair);
        }
        if self.state == ManagerState::Initialized {
            self.state = ManagerState::TornDown;
        }
        self.generation = None;
    }

    /// Routes a pointer-entered event to the evasion controller.
    ///
    /// A pair whose display has disappeared is torn down.
    ///
    /// # Errors
    ///
    /// Returns the controller's error after any stale pair has been released.
    pub fn handle_pointer_entered(
        &mut self,
        handle: WindowHandle,
    ) -> Result<EvasionOutcome, DisplaySetError> {
        let displays = self.services.topology.current_displays()?;
        let result = self
            .evasion
            .on_pointer_entered(&mut self.registry, &displays, handle);
        self.discard_if_stale(&result);
        result
    }

    /// Routes a drag event to the evasion controller.
    ///
    /// # Errors
    ///
    /// Same as [`handle_pointer_entered`](Self::handle_pointer_entered).
    pub fn handle_drag(
        &mut self,
        handle: WindowHandle,
        origin: Point,
    ) -> Result<EvasionOutcome, DisplaySetError> {
        let displays = self.services.topology.current_displays()?;
        let result =
            self.evasion
                .on_window_dragged(&mut self.registry, &displays, handle, origin);
        self.discard_if_stale(&result);
        result
    }

    /// Re-renders the label of `handle`.
    ///
    /// Returns `false` (and does nothing) for ticks from an older generation,
    /// for handles that are not live, and when the host rejects the text.
    pub fn refresh(&mut self, generation: Uuid, handle: WindowHandle) -> bool {
        if self.generation != Some(generation) {
            debug!(%generation, %handle, "ignoring refresh from stale generation");
            return false;
        }
        let Some(window) = self.registry.window(handle) else {
            debug!(%handle, "ignoring refresh for unknown window");
            return false;
        };

        let text = self
            .settings
            .labels
            .get(window.label())
            .render(&self.services.clock.now());
        match self.services.host.set_text(handle, &text) {
            Ok(()) => true,
            Err(e) => {
                warn!(%handle, error = %e, "label refresh failed");
                false
            }
        }
    }

    /// Processes one host event to completion.
    ///
    /// Returns [`ControlFlow::Break`] once the set has been torn down for
    /// shutdown.
    pub fn handle_event(&mut self, event: HostEvent) -> ControlFlow<()> {
        match event {
            HostEvent::PointerEntered(handle) => {
                if let Err(e) = self.handle_pointer_entered(handle) {
                    warn!(%handle, error = %e, "evasion failed");
                }
            }
            HostEvent::WindowDragged { handle, origin } => {
                if let Err(e) = self.handle_drag(handle, origin) {
                    warn!(%handle, error = %e, "drag failed");
                }
            }
            HostEvent::TopologyChanged => match self.handle_topology_changed() {
                Ok(report) if !report.is_complete() => {
                    warn!(failed = report.failed.len(), "some displays have no overlay");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "keeping previous display set"),
            },
            HostEvent::RefreshDue { generation, handle } => {
                self.refresh(generation, handle);
            }
            HostEvent::Shutdown => {
                self.teardown_all();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Creates, shows, and schedules both windows for `display`.
    ///
    /// The primary is created first; if anything after that fails, every
    /// window created so far is closed before the error is returned.
    fn build_pair(&self, display: &Display, generation: Uuid) -> Result<WindowPair, DisplaySetError> {
        let labels = &self.settings.labels;
        let now = self.services.clock.now();
        let unavailable = |source| DisplaySetError::ResourceUnavailable {
            display: display.id,
            source,
        };

        let mut specs = [LabelKind::Time, LabelKind::Date].map(|kind| {
            let style = labels.get(kind);
            let font = style.font_for(&labels.font_family, display);
            let text = style.render(&now);
            let content = self.services.surface.natural_size(&text, &font);
            (
                content,
                WindowSpec {
                    label: kind,
                    display: display.id,
                    frame: display.usable,
                    text,
                    font,
                    appearance: self.settings.appearance,
                },
            )
        });

        let orientation = self.settings.initial_corner;
        let frames = WindowPair::layout(
            orientation,
            &display.usable,
            specs[0].0,
            specs[1].0,
            &self.settings.placement,
        );
        specs[0].1.frame = frames.primary;
        specs[1].1.frame = frames.dependent;

        let host = &self.services.host;
        let primary_handle = host.create_window(&specs[0].1).map_err(unavailable)?;
        let dependent_handle = match host.create_window(&specs[1].1) {
            Ok(handle) => handle,
            Err(e) => {
                host.close_window(primary_handle);
                return Err(unavailable(e));
            }
        };

        for handle in [primary_handle, dependent_handle] {
            if let Err(e) = host.show_window(handle) {
                host.close_window(primary_handle);
                host.close_window(dependent_handle);
                return Err(unavailable(e));
            }
        }

        let primary = OverlayWindow::primary(
            primary_handle,
            LabelKind::Time,
            display.id,
            specs[0].0,
            frames.primary,
            self.settings.dodge_pointer,
        );
        let dependent = OverlayWindow::dependent_of(
            &primary,
            dependent_handle,
            LabelKind::Date,
            specs[1].0,
            frames.dependent,
        );

        let scheduler = &self.services.scheduler;
        scheduler.start(generation, primary_handle, labels.time.refresh);
        scheduler.start(generation, dependent_handle, labels.date.refresh);

        let display_id = display.id;
        debug!(display = %display_id, %primary_handle, %dependent_handle, %orientation, "pair created");
        Ok(WindowPair::new(display.clone(), orientation, primary, dependent))
    }

    fn release(&self, pair: &WindowPair) {
        for handle in pair.handles() {
            self.services.scheduler.stop(handle);
            self.services.host.close_window(handle);
        }
    }

    fn discard_if_stale(&mut self, result: &Result<EvasionOutcome, DisplaySetError>) {
        if let Err(DisplaySetError::MissingDisplay(detached)) = result {
            if let Some(pair) = self.registry.remove(*detached) {
                info!(display = %detached, "display detached, releasing its overlay pair");
                self.release(&pair);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
