//! Editable field state for the selected date.

use crate::collection::EntryCollection;
use crate::entry::TimeEntry;
use crate::types::{ClockTime, DateKey};

/// The fields a front end shows for one date.
///
/// A zero break is shown as an empty field, so `break_minutes` is `None`
/// rather than `Some(0)` for entries without a break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormFields {
    pub clock_in: Option<ClockTime>,
    pub clock_out: Option<ClockTime>,
    pub break_minutes: Option<u32>,
}

impl FormFields {
    /// True when no field has a value.
    pub const fn is_empty(&self) -> bool {
        self.clock_in.is_none() && self.clock_out.is_none() && self.break_minutes.is_none()
    }

    /// Converts the fields into an entry, or `None` if neither clock value is set.
    pub fn to_entry(&self) -> Option<TimeEntry> {
        if self.clock_in.is_none() && self.clock_out.is_none() {
            return None;
        }
        Some(TimeEntry {
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            break_minutes: self.break_minutes.unwrap_or(0),
        })
    }
}

impl From<&TimeEntry> for FormFields {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            clock_in: entry.clock_in,
            clock_out: entry.clock_out,
            break_minutes: (entry.break_minutes > 0).then_some(entry.break_minutes),
        }
    }
}

/// Derives the form fields shown when `key` is selected.
///
/// Dates without a stored entry produce empty fields.
pub fn derive_form_state(collection: &EntryCollection, key: DateKey) -> FormFields {
    collection.get(key).map(FormFields::from).unwrap_or_default()
}
