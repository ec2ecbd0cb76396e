//! Infrastructure layer for clockfloat.
//!
//! Contains the adapters behind the application traits: screen topology
//! sources, window hosts, the tokio refresh scheduler, the system clock, and
//! configuration storage.  Recording doubles for each trait live next to the
//! real adapter and are always compiled, so integration tests can use them.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `clockfloat_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod clock;
pub mod refresh;
pub mod screen_topology;
pub mod storage;
pub mod window_host;
