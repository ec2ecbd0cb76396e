//! Periodic label refresh.
//!
//! [`TokioRefreshScheduler`] spawns one interval task per window.  Each tick is
//! posted to the main event queue as [`HostEvent::RefreshDue`]; the task never
//! touches window state itself, so refresh and placement cannot interleave.
//!
//! [`ManualRefreshScheduler`] records timers without running them.  Tests fire
//! ticks explicitly through [`ManualRefreshScheduler::due_events`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use clockfloat_core::WindowHandle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::application::host::{HostEvent, RefreshScheduler};

// ── Tokio scheduler ───────────────────────────────────────────────────────────

/// Runs refresh timers as tokio tasks on the current runtime.
///
/// Must be used from within a tokio runtime.
pub struct TokioRefreshScheduler {
    events: UnboundedSender<HostEvent>,
    tasks: Mutex<HashMap<WindowHandle, JoinHandle<()>>>,
}

impl TokioRefreshScheduler {
    pub fn new(events: UnboundedSender<HostEvent>) -> Self {
        Self {
            events,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    fn tasks(&self) -> MutexGuard<'_, HashMap<WindowHandle, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of running timers.
    pub fn active_count(&self) -> usize {
        self.tasks().len()
    }
}

impl RefreshScheduler for TokioRefreshScheduler {
    fn start(&self, generation: Uuid, handle: WindowHandle, interval: Duration) {
        if interval.is_zero() {
            warn!(%handle, "refusing zero refresh interval");
            return;
        }

        // First tick one interval from now; the initial text is set at creation.
        let Some(first) = Instant::now()
            .checked_add(interval)
            .filter(|first| first.checked_add(interval).is_some())
        else {
            warn!(%handle, ?interval, "refresh interval out of range");
            return;
        };

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(first, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events
                    .send(HostEvent::RefreshDue { generation, handle })
                    .is_err()
                {
                    trace!(%handle, "event queue closed, refresh timer exiting");
                    break;
                }
            }
        });

        if let Some(previous) = self.tasks().insert(handle, task) {
            previous.abort();
        }
    }

    fn stop(&self, handle: WindowHandle) {
        if let Some(task) = self.tasks().remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioRefreshScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks().drain() {
            task.abort();
        }
    }
}

// ── Manual scheduler ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Timers {
    active: BTreeMap<WindowHandle, (Uuid, Duration)>,
    stopped: Vec<WindowHandle>,
}

/// Records timer starts and stops; never fires on its own.
#[derive(Debug, Default)]
pub struct ManualRefreshScheduler {
    timers: Mutex<Timers>,
}

impl ManualRefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles with a running timer, ascending.
    pub fn active(&self) -> Vec<WindowHandle> {
        self.timers().active.keys().copied().collect()
    }

    /// Handles whose timer was stopped, in stop order.
    pub fn stopped(&self) -> Vec<WindowHandle> {
        self.timers().stopped.clone()
    }

    pub fn interval_of(&self, handle: WindowHandle) -> Option<Duration> {
        self.timers().active.get(&handle).map(|(_, interval)| *interval)
    }

    /// One `RefreshDue` event per running timer, as if every timer fired once.
    pub fn due_events(&self) -> Vec<HostEvent> {
        self.timers()
            .active
            .iter()
            .map(|(handle, (generation, _))| HostEvent::RefreshDue {
                generation: *generation,
                handle: *handle,
            })
            .collect()
    }
}

impl RefreshScheduler for ManualRefreshScheduler {
    fn start(&self, generation: Uuid, handle: WindowHandle, interval: Duration) {
        self.timers().active.insert(handle, (generation, interval));
    }

    fn stop(&self, handle: WindowHandle) {
        let mut timers = self.timers();
        if timers.active.remove(&handle).is_some() {
            timers.stopped.push(handle);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
