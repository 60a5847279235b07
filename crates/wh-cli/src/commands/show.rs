//! Show command for displaying a date's stored fields.

use std::io::Write;

use anyhow::Result;
use wh_core::DateKey;
use wh_db::{KeyValueStore, Session};

use crate::commands::util::describe_fields;

pub fn run<W: Write, S: KeyValueStore>(writer: &mut W, store: S, date: DateKey) -> Result<()> {
    let session = Session::open(store, date);

    writeln!(writer, "{}", date.short_label())?;
    writeln!(writer, "{}", describe_fields(session.form()))?;

    Ok(())
}
