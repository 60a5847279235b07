//! The per-date time record.

use serde::{Deserialize, Serialize};

use crate::types::{ClockTime, ValidationError};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Clock-in, clock-out and break for one date.
///
/// An entry is complete only when both clock values are present. Incomplete
/// entries can be stored but never appear in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry", into = "StoredEntry")]
pub struct TimeEntry {
    pub clock_in: Option<ClockTime>,
    pub clock_out: Option<ClockTime>,
    pub break_minutes: u32,
}

impl TimeEntry {
    /// Creates a complete entry.
    pub const fn complete(clock_in: ClockTime, clock_out: ClockTime, break_minutes: u32) -> Self {
        Self {
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
            break_minutes,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.clock_in.is_some() && self.clock_out.is_some()
    }

    /// True when neither clock value is set.
    pub const fn is_blank(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none()
    }

    /// Whole minutes between clock-in and clock-out.
    ///
    /// A clock-out earlier than the clock-in is taken to fall on the next day,
    /// so the result is always in `0..1440`. Returns `None` for incomplete
    /// entries. The break is not subtracted.
    pub fn worked_minutes(&self) -> Option<i64> {
        let (clock_in, clock_out) = (self.clock_in?, self.clock_out?);
        let minutes = (clock_out.as_naive() - clock_in.as_naive()).num_minutes();
        Some(minutes.rem_euclid(MINUTES_PER_DAY))
    }
}

/// Wire shape of an entry inside the stored collection.
///
/// Older data stores `breakTime` as either a number or a string, and uses an
/// empty string for "no break".
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clock_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clock_out: Option<String>,
    #[serde(default)]
    break_time: Option<BreakTime>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum BreakTime {
    Minutes(u32),
    Text(String),
}

fn parse_clock(value: Option<String>) -> Result<Option<ClockTime>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

impl TryFrom<StoredEntry> for TimeEntry {
    type Error = ValidationError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let break_minutes = match stored.break_time {
            None => 0,
            Some(BreakTime::Minutes(minutes)) => minutes,
            Some(BreakTime::Text(text)) => match text.trim() {
                "" => 0,
                trimmed => trimmed
                    .parse()
                    .map_err(|_| ValidationError::InvalidBreakMinutes { value: text.clone() })?,
            },
        };
        Ok(Self {
            clock_in: parse_clock(stored.clock_in)?,
            clock_out: parse_clock(stored.clock_out)?,
            break_minutes,
        })
    }
}

impl From<TimeEntry> for StoredEntry {
    fn from(entry: TimeEntry) -> Self {
        Self {
            clock_in: entry.clock_in.map(String::from),
            clock_out: entry.clock_out.map(String::from),
            break_time: Some(BreakTime::Minutes(entry.break_minutes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn completeness_requires_both_clock_values() {
        let only_in = TimeEntry {
            clock_in: Some(time("09:00")),
            ..TimeEntry::default()
        };
        assert!(!only_in.is_complete());
        assert!(!only_in.is_blank());
        assert!(TimeEntry::default().is_blank());
        assert!(TimeEntry::complete(time("09:00"), time("17:00"), 0).is_complete());
    }

    #[test]
    fn worked_minutes_same_day() {
        let entry = TimeEntry::complete(time("09:00"), time("17:30"), 30);
        assert_eq!(entry.worked_minutes(), Some(510));
    }

    #[test]
    fn worked_minutes_wraps_past_midnight() {
        let entry = TimeEntry::complete(time("22:00"), time("06:00"), 0);
        assert_eq!(entry.worked_minutes(), Some(480));
    }

    #[test]
    fn worked_minutes_equal_times_is_zero() {
        let entry = TimeEntry::complete(time("12:00"), time("12:00"), 0);
        assert_eq!(entry.worked_minutes(), Some(0));
    }

    #[test]
    fn worked_minutes_across_month_end() {
        let entry = TimeEntry::complete(time("23:30"), time("00:15"), 0);
        assert_eq!(entry.worked_minutes(), Some(45));
    }

    #[test]
    fn worked_minutes_incomplete_is_none() {
        let entry = TimeEntry {
            clock_out: Some(time("17:00")),
            ..TimeEntry::default()
        };
        assert_eq!(entry.worked_minutes(), None);
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let entry = TimeEntry::complete(time("9:00"), time("17:30"), 30);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"clockIn":"09:00","clockOut":"17:30","breakTime":30}"#);
    }

    #[test]
    fn omits_absent_clock_values() {
        let entry = TimeEntry {
            clock_in: Some(time("08:15")),
            ..TimeEntry::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"clockIn":"08:15","breakTime":0}"#);
    }

    #[test]
    fn accepts_legacy_break_representations() {
        let cases = [
            (r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":""}"#, 0),
            (r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":"15"}"#, 15),
            (r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":40}"#, 40),
            (r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":null}"#, 0),
            (r#"{"clockIn":"09:00","clockOut":"17:00"}"#, 0),
        ];
        for (json, expected) in cases {
            let entry: TimeEntry = serde_json::from_str(json).unwrap();
            assert_eq!(entry.break_minutes, expected, "{json}");
        }
    }

    #[test]
    fn empty_clock_strings_read_as_absent() {
        let entry: TimeEntry =
            serde_json::from_str(r#"{"clockIn":"","clockOut":null,"breakTime":""}"#).unwrap();
        assert!(entry.is_blank());
    }

    #[test]
    fn rejects_malformed_values() {
        for json in [
            r#"{"clockIn":"9am","clockOut":"17:00"}"#,
            r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":"lots"}"#,
            r#"{"clockIn":"09:00","clockOut":"17:00","breakTime":-5}"#,
        ] {
            assert!(serde_json::from_str::<TimeEntry>(json).is_err(), "{json}");
        }
    }
}
