//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date key: {value:?} (expected YYYY-MM-DD)")]
    InvalidDateKey { value: String },

    /// The value is not an `HH:MM` time of day.
    #[error("invalid clock time: {value:?} (expected HH:MM)")]
    InvalidClockTime { value: String },

    /// The break duration is not a non-negative whole number of minutes.
    #[error("invalid break minutes: {value:?}")]
    InvalidBreakMinutes { value: String },
}

/// Canonical identifier for a calendar day.
///
/// Renders as `YYYY-MM-DD`, so the string form sorts the same way the dates do.
/// This is the sole lookup key for stored entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Wraps a calendar date.
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDateKey {
                value: format!("{year:04}-{month:02}-{day:02}"),
            })
    }

    /// The current date on the local clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns the underlying calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Short heading used when a date is selected, e.g. `Fri, Mar 1`.
    pub fn short_label(self) -> String {
        self.0.format("%a, %b %-d").to_string()
    }

    /// Long heading used in reports, e.g. `Friday 1 March`.
    pub fn long_label(self) -> String {
        self.0.format("%A %-d %B").to_string()
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields; the key format is fixed width
        if s.len() != 10 {
            return Err(ValidationError::InvalidDateKey {
                value: s.to_string(),
            });
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDateKey {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// A time of day with minute precision.
///
/// Stored as zero-padded `HH:MM`; parsing also accepts a single-digit hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Creates a clock time after validation.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidClockTime {
                value: format!("{hour}:{minute:02}"),
            })
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }

    /// Report form with an unpadded hour, e.g. `9:00`.
    pub fn report_label(self) -> String {
        format!("{}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidClockTime {
            value: s.to_string(),
        };
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
