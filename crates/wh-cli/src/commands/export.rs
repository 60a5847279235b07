//! Implementation of the `wh export` command.
//!
//! Generates the work report from stored entries and hands it off either as
//! `Work_Report.txt` in a directory or as text on stdout.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wh_core::{DateKey, REPORT_FILE_NAME};
use wh_db::{EntryStore, KeyValueStore};

/// Where the generated report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Directory(PathBuf),
    Stdout,
}

/// Run the export command.
///
/// Only entries dated within `from..=to` are included. Fails without writing
/// anything when no included entry is complete.
pub fn run<W: Write, S: KeyValueStore>(
    writer: &mut W,
    store: S,
    from: Option<DateKey>,
    to: Option<DateKey>,
    target: &Target,
) -> Result<()> {
    let collection = EntryStore::new(store).load().between(from, to);
    let report = wh_core::generate(&collection)?;

    match target {
        Target::Stdout => write!(writer, "{report}")?,
        Target::Directory(dir) => {
            let path = deliver(dir, REPORT_FILE_NAME, report.as_str())?;
            writeln!(writer, "Report written to {}", path.display())?;
        }
    }

    Ok(())
}

/// Writes `text` as `file_name` inside `dir`, creating the directory if needed.
pub fn deliver(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory: {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, text)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "report written");
    Ok(path)
}
