//! Time and date label content.
//!
//! A [`LabelStyle`] decides how big a label's font is on a given display and
//! what text it shows at a given instant.  The instant comes from a
//! [`TimeSource`] so tests can pin the clock.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use clockfloat_core::{Display, LabelKind};
use serde::{Deserialize, Serialize};

/// How big a label's font is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    /// Absolute size in points.
    Points(f64),
    /// Fraction of the owning display's usable height.
    ScreenFraction(f64),
}

impl FontSize {
    /// Resolves to points for a display of `display_height`.
    pub fn resolve(self, display_height: f64) -> f64 {
        match self {
            FontSize::Points(points) => points,
            FontSize::ScreenFraction(fraction) => display_height * fraction,
        }
    }

    /// Returns `true` when the size resolves to a positive point size on any display.
    pub fn is_positive(self) -> bool {
        match self {
            FontSize::Points(v) | FontSize::ScreenFraction(v) => v.is_finite() && v > 0.0,
        }
    }
}

/// A resolved font: family plus concrete point size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub points: f64,
}

/// Source of the current local time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Size, format, and refresh cadence of one label kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub kind: LabelKind,
    pub size: FontSize,
    /// chrono `strftime` pattern, e.g. `%H:%M`.
    pub format: String,
    pub refresh: Duration,
}

impl LabelStyle {
    /// Resolves this label's font on `display`.
    pub fn font_for(&self, family: &str, display: &Display) -> FontSpec {
        FontSpec {
            family: family.to_string(),
            points: self.size.resolve(display.usable.height),
        }
    }

    /// Formats `now` with this label's pattern.
    ///
    /// An invalid pattern yields an empty string; patterns are validated when
    /// the configuration is loaded.
    pub fn render(&self, now: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.format)).is_err() {
            out.clear();
        }
        out
    }
}

/// Styles for both labels plus the shared font family.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyles {
    pub font_family: String,
    pub time: LabelStyle,
    pub date: LabelStyle,
}

impl LabelStyles {
    pub fn get(&self, kind: LabelKind) -> &LabelStyle {
        match kind {
            LabelKind::Time => &self.time,
            LabelKind::Date => &self.date,
        }
    }
}

impl Default for LabelStyles {
    fn default() -> Self {
        Self {
            font_family: "New".to_string(),
            time: LabelStyle {
                kind: LabelKind::Time,
                size: FontSize::Points(22.0),
                format: "%H:%M".to_string(),
                refresh: Duration::from_secs(1),
            },
            date: LabelStyle {
                kind: LabelKind::Date,
                size: FontSize::Points(14.0),
                format: "%Y-%m-%d".to_string(),
                refresh: Duration::from_secs(10),
            },
        }
    }
}

/// Returns `true` if `format` is a well-formed chrono `strftime` pattern that
/// can render a local wall-clock time.
///
/// Offset and zone specifiers (`%z`, `%Z`, `%:z`) parse but cannot format a
/// [`NaiveDateTime`], so they are rejected here rather than rendering blank.
pub fn is_valid_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let mut sample = String::new();
    write!(sample, "{}", NaiveDateTime::default().format(format)).is_ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
