//! Work-hours tracker CLI library.
//!
//! This crate provides the CLI interface for the work-hours tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, FieldArgs};
pub use config::Config;
