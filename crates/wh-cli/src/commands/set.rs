//! Set command for recording times on a date.

use std::io::Write;

use anyhow::{Context, Result};
use wh_core::DateKey;
use wh_db::{KeyValueStore, Session};

use crate::cli::FieldArgs;
use crate::commands::util::describe_fields;

/// Applies `fields` over the stored values for `date` and saves the result.
///
/// Clearing the last clock value removes the date's entry.
pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    store: S,
    date: DateKey,
    fields: &FieldArgs,
) -> Result<()> {
    let mut session = Session::open(store, date);

    if let Some(time) = fields.clock_in {
        session.set_clock_in(Some(time));
    } else if fields.clear_in {
        session.set_clock_in(None);
    }
    if let Some(time) = fields.clock_out {
        session.set_clock_out(Some(time));
    } else if fields.clear_out {
        session.set_clock_out(None);
    }
    if let Some(minutes) = fields.break_minutes {
        session.set_break_minutes((minutes > 0).then_some(minutes));
    } else if fields.clear_break {
        session.set_break_minutes(None);
    }

    if !session.is_dirty() {
        writeln!(writer, "No changes for {}.", date.short_label())?;
        return Ok(());
    }

    session.save().context("failed to save entry")?;

    if !session.collection().contains(date) {
        writeln!(writer, "Cleared {}.", date.short_label())?;
        return Ok(());
    }

    writeln!(writer, "Saved {}", date.short_label())?;
    writeln!(writer, "{}", describe_fields(session.form()))?;
    if !session.form().to_entry().is_some_and(|e| e.is_complete()) {
        writeln!(writer, "Entry is incomplete and will not appear in reports.")?;
    }

    Ok(())
}
