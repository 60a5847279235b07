use std::io::stdout;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wh_cli::commands::{clear, export, list, set, show, status};
use wh_cli::{Cli, Commands, Config};
use wh_core::DateKey;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(wh_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = wh_db::Database::open(&config.database_path).with_context(|| {
        format!("failed to open database: {}", config.database_path.display())
    })?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut out = stdout().lock();
    let selected = |date: Option<DateKey>| date.unwrap_or_else(DateKey::today);

    match &cli.command {
        Some(Commands::Set { date, fields }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            set::run(&mut out, db, selected(*date), fields)?;
        }
        Some(Commands::Show { date }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            show::run(&mut out, db, selected(*date))?;
        }
        Some(Commands::Clear { date }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            clear::run(&mut out, db, selected(*date))?;
        }
        Some(Commands::List { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            list::run(&mut out, db, *json)?;
        }
        Some(Commands::Export {
            from,
            to,
            dir,
            stdout,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let target = if *stdout {
                export::Target::Stdout
            } else {
                export::Target::Directory(dir.clone().unwrap_or(config.export_dir))
            };
            export::run(&mut out, db, *from, *to, &target)?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut out, db, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
