//! Window host adapters.
//!
//! | Module     | Purpose                                                   |
//! |------------|-----------------------------------------------------------|
//! | `headless` | Shipped host: keeps window state in memory and logs it    |
//! | `mock`     | Recording host for tests, with per-display failure hooks  |
//!
//! Neither adapter rasterises text, so both measure labels with
//! [`estimate_text_size`].

use clockfloat_core::Size;

use crate::application::labels::FontSpec;

pub mod headless;
pub mod mock;

/// Average glyph advance as a fraction of the point size.
const AVERAGE_ADVANCE: f64 = 0.6;

/// Line height as a multiple of the point size.
const LINE_HEIGHT: f64 = 1.2;

/// Approximates the natural size of `text` set in `font` on a single line.
pub fn estimate_text_size(text: &str, font: &FontSpec) -> Size {
    let glyphs = text.chars().count() as f64;
    Size::new(
        glyphs * AVERAGE_ADVANCE * font.points,
        LINE_HEIGHT * font.points,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
