//! Clear command for removing a date's entry.

use std::io::Write;

use anyhow::{Context, Result};
use wh_core::DateKey;
use wh_db::{KeyValueStore, Session};

pub fn run<W: Write, S: KeyValueStore>(writer: &mut W, store: S, date: DateKey) -> Result<()> {
    let mut session = Session::open(store, date);

    if !session.collection().contains(date) {
        writeln!(writer, "Nothing stored for {}.", date.short_label())?;
        return Ok(());
    }

    session.clear().context("failed to clear entry")?;
    writeln!(writer, "Cleared {}.", date.short_label())?;

    Ok(())
}
