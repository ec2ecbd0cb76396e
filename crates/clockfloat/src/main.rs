//! clockfloat entry point.
//!
//! Loads the configuration, builds one time/date pair per display, and then
//! processes host events one at a time until shutdown.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                      -- read-only TOML, defaults if absent
//!  └─ DisplaySetManager::initialize_from_topology()
//!  └─ event loop (single thread)
//!       ├─ PointerEntered / WindowDragged -> EvasionController
//!       ├─ TopologyChanged                -> rebuild the whole set
//!       ├─ RefreshDue                     -> re-render one label
//!       └─ Shutdown (Ctrl-C)              -> teardown_all, exit
//! ```
//!
//! The runtime is current-thread: refresh timers and the Ctrl-C listener are
//! tasks that only post events into the queue, so all window state is touched
//! from the loop alone.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clockfloat::application::display_set::{Collaborators, DisplaySetManager};
use clockfloat::application::host::{ContentSurface, HostEvent, WindowHost};
use clockfloat::infrastructure::{
    clock::SystemTimeSource,
    refresh::TokioRefreshScheduler,
    screen_topology::StaticScreenTopology,
    storage::config::load_config,
    window_host::headless::HeadlessWindowHost,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    info!("clockfloat starting");

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<HostEvent>();

    // ── Host services ─────────────────────────────────────────────────────────
    let host = Arc::new(HeadlessWindowHost::new());
    let services = Collaborators {
        topology: Arc::new(StaticScreenTopology::new(config.displays())),
        host: Arc::clone(&host) as Arc<dyn WindowHost>,
        surface: host as Arc<dyn ContentSurface>,
        scheduler: Arc::new(TokioRefreshScheduler::new(events_tx.clone())),
        clock: Arc::new(SystemTimeSource),
    };

    let mut manager = DisplaySetManager::new(config.overlay_settings(), services);
    let report = manager
        .initialize_from_topology()
        .context("enumerating displays")?;
    for (display_id, error) in &report.failed {
        warn!(display = %display_id, %error, "display has no overlay");
    }
    info!(
        generation = %report.generation,
        displays = report.created.len(),
        "overlays ready"
    );

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let shutdown_tx = events_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(HostEvent::Shutdown);
        }
    });
    drop(events_tx);

    // ── Event loop ────────────────────────────────────────────────────────────
    while let Some(event) = events_rx.recv().await {
        if manager.handle_event(event).is_break() {
            break;
        }
    }

    manager.teardown_all();
    info!("clockfloat stopped");
    Ok(())
}
