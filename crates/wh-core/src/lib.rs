//! Core domain logic for the work-hours tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Date keys and clock times: validated identifiers for days and times of day
//! - Entries: the clock-in/clock-out/break record kept per date
//! - Form state: the editable projection of a selected date
//! - Reports: per-day worked time rendered as text

mod collection;
mod entry;
pub mod form;
pub mod report;
pub mod types;

pub use collection::EntryCollection;
pub use entry::TimeEntry;
pub use form::{FormFields, derive_form_state};
pub use report::{DaySummary, REPORT_FILE_NAME, ReportError, ReportText, generate, summarize};
pub use types::{ClockTime, DateKey, ValidationError};
