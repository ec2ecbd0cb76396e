//! Screen-corner orientation of a primary overlay window.
//!
//! The four corners form a cycle.  Each pointer evasion advances a primary
//! window one step clockwise around its display:
//!
//! ```text
//! TopLeft ──► TopRight
//!    ▲            │
//!    │            ▼
//! BottomLeft ◄── BottomRight
//! ```
//!
//! Orientation is an exhaustive enum, so an out-of-range corner cannot be
//! constructed and the placement engine has no failure path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an orientation from text fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown corner {0:?}: expected top-left, top-right, bottom-right, or bottom-left")]
pub struct OrientationParseError(pub String);

/// The display corner a primary window is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Orientation {
    /// All orientations in cycle order.
    pub const ALL: [Orientation; 4] = [
        Orientation::TopLeft,
        Orientation::TopRight,
        Orientation::BottomRight,
        Orientation::BottomLeft,
    ];

    /// Position of this orientation in the cycle (0..4).
    pub fn index(self) -> usize {
        match self {
            Orientation::TopLeft => 0,
            Orientation::TopRight => 1,
            Orientation::BottomRight => 2,
            Orientation::BottomLeft => 3,
        }
    }

    /// Returns the next corner in the cycle: `(index + 1) mod 4`.
    pub fn advance(self) -> Orientation {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns `true` for the two corners along the top edge of the display.
    pub fn is_top(self) -> bool {
        matches!(self, Orientation::TopLeft | Orientation::TopRight)
    }

    fn as_str(self) -> &'static str {
        match self {
            Orientation::TopLeft => "top-left",
            Orientation::TopRight => "top-right",
            Orientation::BottomRight => "bottom-right",
            Orientation::BottomLeft => "bottom-left",
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::BottomRight
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(&['_', ' '][..], "-");
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == normalized)
            .ok_or_else(|| OrientationParseError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_advance_four_times_returns_to_start_for_every_orientation() {
        for o in Orientation::ALL {
            assert_eq!(o.advance().advance().advance().advance(), o);
        }
    }

    #[test]
    fn test_advance_visits_each_orientation_exactly_once_per_cycle() {
        for start in Orientation::ALL {
            // Arrange
            let mut seen = HashSet::new();
            let mut current = start;

            // Act
            for _ in 0..4 {
                seen.insert(current);
                current = current.advance();
            }

            // Assert
            assert_eq!(seen.len(), 4, "cycle from {start} must visit all corners");
        }
    }

    #[test]
    fn test_advance_follows_clockwise_order() {
        assert_eq!(Orientation::TopLeft.advance(), Orientation::TopRight);
        assert_eq!(Orientation::TopRight.advance(), Orientation::BottomRight);
        assert_eq!(Orientation::BottomRight.advance(), Orientation::BottomLeft);
        assert_eq!(Orientation::BottomLeft.advance(), Orientation::TopLeft);
    }

    #[test]
    fn test_is_top_is_true_only_for_top_corners() {
        assert!(Orientation::TopLeft.is_top());
        assert!(Orientation::TopRight.is_top());
        assert!(!Orientation::BottomRight.is_top());
        assert!(!Orientation::BottomLeft.is_top());
    }

    #[test]
    fn test_default_orientation_is_bottom_right() {
        assert_eq!(Orientation::default(), Orientation::BottomRight);
    }

    #[test]
    fn test_from_str_accepts_kebab_snake_and_mixed_case() {
        assert_eq!("top-left".parse(), Ok(Orientation::TopLeft));
        assert_eq!("Bottom_Right".parse(), Ok(Orientation::BottomRight));
        assert_eq!(" bottom left ".parse(), Ok(Orientation::BottomLeft));
    }

    #[test]
    fn test_from_str_rejects_unknown_corner() {
        let result: Result<Orientation, _> = "middle".parse();
        assert_eq!(result, Err(OrientationParseError("middle".to_string())));
    }

    #[test]
    fn test_orientation_deserializes_from_kebab_case_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            corner: Orientation,
        }

        let parsed: Wrapper = toml::from_str(r#"corner = "top-right""#).expect("deserialize");
        assert_eq!(parsed.corner, Orientation::TopRight);
    }
}
