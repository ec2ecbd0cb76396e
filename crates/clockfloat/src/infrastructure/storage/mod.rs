//! Storage infrastructure: read-only configuration file.
//!
//! The `config` sub-module locates the TOML file in the platform config
//! directory, fills in defaults for anything missing, validates the result,
//! and converts it into the settings the application layer consumes.

pub mod config;
