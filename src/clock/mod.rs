//! Day clock: the single time source for streak continuity.
//!
//! Everything day-based in the engine goes through [`DayKey`] so that two
//! timestamps on the same local calendar day always compare equal, and
//! through [`Clock`] so tests can pin the calendar in place.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// A normalized local-calendar-day identifier.
///
/// Serializes as `YYYY-MM-DD`. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The key `days` calendar days after this one (negative for earlier).
    pub fn offset(&self, days: i64) -> DayKey {
        let shifted = if days >= 0 {
            self.0
                .checked_add_days(Days::new(days as u64))
                .unwrap_or(self.0)
        } else {
            self.0
                .checked_sub_days(Days::new(days.unsigned_abs()))
                .unwrap_or(self.0)
        };
        DayKey(shifted)
    }

    /// The key for the day before this one.
    pub fn yesterday(&self) -> DayKey {
        self.offset(-1)
    }

    /// Inclusive day span between two keys, always >= 1 for `self <= other`.
    pub fn days_until_inclusive(&self, other: &DayKey) -> i64 {
        (other.0 - self.0).num_days() + 1
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(DayKey)
    }
}

/// Time source consulted by the streak tracker and reporting views.
///
/// `today()` must reflect a single snapshot of "now" per call; callers take
/// one snapshot at the top of an operation and thread it through, so a
/// midnight rollover mid-operation cannot split a single transition across
/// two days.
pub trait Clock: Send + Sync {
    fn today(&self) -> DayKey;

    /// Today's key shifted by `offset_days` (e.g. `-1` for yesterday).
    fn day_key(&self, offset_days: i64) -> DayKey {
        self.today().offset(offset_days)
    }
}

/// Wall-clock implementation using the device's local calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey(Local::now().date_naive())
    }
}

/// Test clock pinned to an explicit date, advanced manually.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<DayKey>,
}

impl FixedClock {
    pub fn new(day: DayKey) -> Self {
        Self {
            today: Mutex::new(day),
        }
    }

    pub fn set_today(&self, day: DayKey) {
        *self.today.lock().unwrap() = day;
    }

    /// Moves the clock forward by `days` calendar days.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.today.lock().unwrap();
        *guard = guard.offset(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        *self.today.lock().unwrap()
    }
}
