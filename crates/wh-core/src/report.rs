//! Report generation from stored entries.
//!
//! Each complete entry becomes one day block:
//!
//! ```text
//! Friday 1 March
//! 8:00 - 16:00 (8 hrs 0 mins)
//! ```
//!
//! Blocks are separated by a blank line and appear in chronological order.

use std::fmt;

use thiserror::Error;

use crate::collection::EntryCollection;
use crate::types::{ClockTime, DateKey};

/// Suggested filename for an exported report.
pub const REPORT_FILE_NAME: &str = "Work_Report.txt";

/// Report generation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No stored entry has both a clock-in and a clock-out.
    #[error("No valid entries to generate a report.")]
    NoEntries,
}

/// Derived figures for one complete day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: DateKey,
    pub clock_in: ClockTime,
    pub clock_out: ClockTime,
    pub worked_minutes: i64,
    pub break_minutes: u32,
}

impl DaySummary {
    /// Writes the two-line block for this day.
    fn write_block(&self, out: &mut String) {
        let break_clause = if self.break_minutes > 0 {
            format!(", {} min break", self.break_minutes)
        } else {
            String::new()
        };
        out.push_str(&self.date.long_label());
        out.push('\n');
        out.push_str(&format!(
            "{} - {} ({}{break_clause})\n",
            self.clock_in.report_label(),
            self.clock_out.report_label(),
            format_duration(self.worked_minutes),
        ));
    }
}

/// Rendered report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportText(String);

impl ReportText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats whole minutes as `H hrs M mins`.
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);
    format!("{hours} hrs {minutes} mins")
}

/// Computes per-day figures for every complete entry, in date order.
pub fn summarize(collection: &EntryCollection) -> Vec<DaySummary> {
    collection
        .iter()
        .filter_map(|(date, entry)| {
            Some(DaySummary {
                date,
                clock_in: entry.clock_in?,
                clock_out: entry.clock_out?,
                worked_minutes: entry.worked_minutes()?,
                break_minutes: entry.break_minutes,
            })
        })
        .collect()
}

/// Generates the report text for all complete entries.
///
/// Fails with [`ReportError::NoEntries`] rather than producing an empty report.
pub fn generate(collection: &EntryCollection) -> Result<ReportText, ReportError> {
    let days = summarize(collection);
    if days.is_empty() {
        return Err(ReportError::NoEntries);
    }
    tracing::debug!(days = days.len(), "generating report");

    let mut text = String::new();
    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        day.write_block(&mut text);
    }
    Ok(ReportText(text))
}
