//! List command for showing every stored date.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use wh_core::{ClockTime, DateKey, EntryCollection, report::format_duration};
use wh_db::{EntryStore, KeyValueStore};

/// One stored date in `--json` output.
#[derive(Debug, Serialize)]
struct ListRow {
    date: DateKey,
    clock_in: Option<ClockTime>,
    clock_out: Option<ClockTime>,
    break_minutes: u32,
    complete: bool,
    worked_minutes: Option<i64>,
}

fn rows(collection: &EntryCollection) -> Vec<ListRow> {
    collection
        .iter()
        .map(|(date, entry)| ListRow {
            date,
            clock_in: entry.clock_in,
            clock_out: entry.clock_out,
            break_minutes: entry.break_minutes,
            complete: entry.is_complete(),
            worked_minutes: entry.worked_minutes(),
        })
        .collect()
}

pub fn run<W: Write, S: KeyValueStore>(writer: &mut W, store: S, json: bool) -> Result<()> {
    let collection = EntryStore::new(store).load();
    let rows = rows(&collection);

    if json {
        let output = serde_json::to_string_pretty(&rows).context("failed to serialize entries")?;
        writeln!(writer, "{output}")?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    let clock = |t: Option<ClockTime>| t.map_or_else(|| "?".to_string(), ClockTime::report_label);
    for row in &rows {
        let detail = match row.worked_minutes {
            Some(minutes) if row.break_minutes > 0 => {
                format!("{}, {} min break", format_duration(minutes), row.break_minutes)
            }
            Some(minutes) => format_duration(minutes),
            None => "(incomplete)".to_string(),
        };
        writeln!(
            writer,
            "{}  {} - {}  {detail}",
            row.date,
            clock(row.clock_in),
            clock(row.clock_out)
        )?;
    }
    writeln!(
        writer,
        "{} entries, {} complete",
        rows.len(),
        collection.complete_count()
    )?;

    Ok(())
}
