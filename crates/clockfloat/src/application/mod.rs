//! Application layer use cases.
//!
//! Use cases in this layer orchestrate the pure `clockfloat_core` domain and
//! talk to the outside world only through traits, so every host adapter can
//! be replaced by a recording mock in tests.
//!
//! # Sub-modules
//!
//! - **`host`** – collaborator traits for the windowing layer, text
//!   measurement, and periodic refresh, plus the `HostEvent` queue type.
//!
//! - **`labels`** – font sizing and text production for the time and date
//!   labels.
//!
//! - **`evasion`** – reacts to the pointer entering a label by moving the
//!   pair to the next corner.
//!
//! - **`display_set`** – owns every window pair, keyed by display, and
//!   rebuilds the set when the display topology changes.

pub mod display_set;
pub mod evasion;
pub mod host;
pub mod labels;
