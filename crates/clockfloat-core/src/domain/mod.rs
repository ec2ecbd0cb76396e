//! Domain entities for overlay placement.
//!
//! These types represent the core business logic with no OS dependencies:
//!
//! - [`geometry`]: rectangles, sizes, and points in display space.
//! - [`orientation`]: the corner a primary window is anchored to.
//! - [`placement`]: corner-anchored rectangle computation.
//! - [`stick`]: dependent-window rectangle derivation.
//! - [`window`]: overlay windows, the primary/dependent pair, and displays.

pub mod geometry;
pub mod orientation;
pub mod placement;
pub mod stick;
pub mod window;
