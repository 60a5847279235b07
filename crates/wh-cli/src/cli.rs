//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wh_core::{ClockTime, DateKey};

use crate::commands::util::parse_date;

/// Personal work-hours tracker.
///
/// Records clock-in and clock-out times per calendar date and exports a
/// plain-text report of the days worked.
#[derive(Debug, Parser)]
#[command(name = "wh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record clock-in, clock-out and break for a date.
    ///
    /// Fields not given keep their stored values.
    Set {
        /// Date to edit: YYYY-MM-DD, today, yesterday or "N days ago".
        #[arg(value_parser = parse_date)]
        date: Option<DateKey>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show the stored fields for a date.
    Show {
        /// Date to show: YYYY-MM-DD, today, yesterday or "N days ago".
        #[arg(value_parser = parse_date)]
        date: Option<DateKey>,
    },

    /// Remove everything stored for a date.
    Clear {
        /// Date to clear: YYYY-MM-DD, today, yesterday or "N days ago".
        #[arg(value_parser = parse_date)]
        date: Option<DateKey>,
    },

    /// List all stored dates.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate the work report and write it to a file.
    Export {
        /// First date to include.
        #[arg(long, value_parser = parse_date)]
        from: Option<DateKey>,

        /// Last date to include.
        #[arg(long, value_parser = parse_date)]
        to: Option<DateKey>,

        /// Directory to write the report into (defaults to `export_dir`).
        #[arg(long, conflicts_with = "stdout")]
        dir: Option<PathBuf>,

        /// Print the report instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show storage location and entry counts.
    Status,
}

/// Field edits for `wh set`.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Clock-in time (HH:MM).
    #[arg(long = "in", value_name = "HH:MM", conflicts_with = "clear_in")]
    pub clock_in: Option<ClockTime>,

    /// Clock-out time (HH:MM).
    #[arg(long = "out", value_name = "HH:MM", conflicts_with = "clear_out")]
    pub clock_out: Option<ClockTime>,

    /// Break length in minutes.
    #[arg(long = "break", value_name = "MINUTES", conflicts_with = "clear_break")]
    pub break_minutes: Option<u32>,

    /// Unset the clock-in time.
    #[arg(long)]
    pub clear_in: bool,

    /// Unset the clock-out time.
    #[arg(long)]
    pub clear_out: bool,

    /// Unset the break.
    #[arg(long)]
    pub clear_break: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_set_with_fields() {
        let cli = Cli::try_parse_from([
            "wh", "set", "2024-03-01", "--in", "9:00", "--out", "17:30", "--break", "30",
        ])
        .unwrap();

        let Some(Commands::Set { date, fields }) = cli.command else {
            panic!("expected set command");
        };
        assert_eq!(date, Some("2024-03-01".parse().unwrap()));
        assert_eq!(fields.clock_in, Some("09:00".parse().unwrap()));
        assert_eq!(fields.clock_out, Some("17:30".parse().unwrap()));
        assert_eq!(fields.break_minutes, Some(30));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(Cli::try_parse_from(["wh", "set", "--in", "9am"]).is_err());
        assert!(Cli::try_parse_from(["wh", "set", "--break", "-5"]).is_err());
    }

    #[test]
    fn rejects_conflicting_field_flags() {
        assert!(Cli::try_parse_from(["wh", "set", "--in", "09:00", "--clear-in"]).is_err());
        assert!(Cli::try_parse_from(["wh", "export", "--dir", "/tmp", "--stdout"]).is_err());
    }
}
