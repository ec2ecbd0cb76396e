//! Time sources for label text.

use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::application::labels::TimeSource;

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a chosen instant, for tests.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    instant: Mutex<NaiveDateTime>,
}

impl FixedTimeSource {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Pins the clock to a calendar date and wall time.
    ///
    /// An impossible date or time pins the clock to the Unix epoch instead.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .unwrap_or_default();
        Self::new(instant)
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: NaiveDateTime) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> NaiveDateTime {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
