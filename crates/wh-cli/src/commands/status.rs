//! Status command for showing storage location and entry counts.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use wh_db::{Database, EntryStore, STORAGE_KEY};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, db: Database, config: &Config) -> Result<()> {
    let last_saved = db.updated_at(STORAGE_KEY)?;
    let collection = EntryStore::new(db).load();

    writeln!(writer, "Work hours status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Export directory: {}", config.export_dir.display())?;

    if collection.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Entries: {} ({} complete)",
        collection.len(),
        collection.complete_count()
    )?;
    if let Some(saved) = last_saved {
        writeln!(
            writer,
            "Last saved: {}",
            saved.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        )?;
    }

    Ok(())
}
