//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use regex::Regex;
use wh_core::{ClockTime, DateKey, FormFields, report::format_duration};

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative dates (~100 years in days).
const MAX_RELATIVE_DAYS: u64 = 100 * 366;

/// Parse a date argument relative to the local clock.
pub fn parse_date(s: &str) -> anyhow::Result<DateKey> {
    parse_date_from(s, DateKey::today().date())
}

/// Parse a date as either `YYYY-MM-DD` or a date relative to `today`.
///
/// Supports:
/// - `2024-03-01`
/// - `today`, `yesterday`
/// - `3 days ago`, `1 week ago`
pub fn parse_date_from(s: &str, today: NaiveDate) -> anyhow::Result<DateKey> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(DateKey::new(today)),
        "yesterday" => return days_before(today, 1),
        _ => {}
    }

    if let Some(caps) = RELATIVE_DATE_RE.captures(s) {
        let n: u64 = caps[1]
            .parse()
            .context("failed to parse number in relative date")?;
        let days = match &caps[2] {
            "day" => n,
            "week" => n.saturating_mul(7),
            unit => anyhow::bail!("Unknown date unit: {unit}"),
        };
        if days > MAX_RELATIVE_DAYS {
            anyhow::bail!("Relative date too far back: {s}");
        }
        return days_before(today, days);
    }

    s.parse::<DateKey>().map_err(|_| {
        anyhow::anyhow!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-03-01), 'today', 'yesterday' or 'N days ago'"
        )
    })
}

fn days_before(today: NaiveDate, days: u64) -> anyhow::Result<DateKey> {
    today
        .checked_sub_days(Days::new(days))
        .map(DateKey::new)
        .context("date out of range")
}

/// Renders form fields as aligned `label: value` lines.
pub fn describe_fields(fields: &FormFields) -> String {
    let clock = |t: Option<ClockTime>| t.map_or_else(|| "-".to_string(), ClockTime::report_label);
    let mut lines = vec![
        format!("Clock in:  {}", clock(fields.clock_in)),
        format!("Clock out: {}", clock(fields.clock_out)),
        format!(
            "Break:     {}",
            fields
                .break_minutes
                .map_or_else(|| "-".to_string(), |m| format!("{m} min"))
        ),
    ];
    if let Some(worked) = fields.to_entry().and_then(|e| e.worked_minutes()) {
        lines.push(format!("Worked:    {}", format_duration(worked)));
    }
    lines.join("\n")
}
