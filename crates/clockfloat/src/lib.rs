//! clockfloat library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does clockfloat do?
//!
//! It keeps a small time label and a date label floating above all other
//! windows on every attached display.  The date label is stuck to the time
//! label.  When the pointer enters either label, the pair hops to the next
//! corner of its display so it never sits under the cursor.
//!
//! 1. `DisplaySetManager` asks the screen topology for the attached displays
//!    and builds one time/date pair per display.
//! 2. Each label's text is refreshed on its own interval.
//! 3. `EvasionController` reacts to pointer-entered events by advancing the
//!    pair's corner and moving both windows in one batch.
//! 4. A topology change rebuilds the whole set from scratch.

/// Application layer: use cases and the collaborator traits they depend on.
pub mod application;

/// Infrastructure layer: host adapters, timers, and configuration storage.
pub mod infrastructure;
