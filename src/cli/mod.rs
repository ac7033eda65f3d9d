//! Command-line interface
//!
//! ```bash
//! # Print every step of a plan
//! kerosene preview plan.yaml
//!
//! # Every 10th step, as JSON
//! kerosene preview plan.yaml --every 10 --format json
//!
//! # Check a plan without running it
//! kerosene validate plan.yaml
//! ```

mod preview;
mod validate;

#[cfg(test)]
mod tests;

pub use preview::{preview_rows, render_json, render_table, PreviewRow};
pub use validate::format_summary;

use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

/// Kerosene: hyperparameter schedules for training loops
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "kerosene")]
#[command(version)]
#[command(about = "Preview and validate hyperparameter schedule plans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a plan and print the hyperparameters at each step
    Preview(PreviewArgs),

    /// Validate a plan without running it
    Validate(ValidateArgs),
}

/// Arguments for the preview command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PreviewArgs {
    /// Path to the YAML plan
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print every Nth step (the first and last steps are always printed)
    #[arg(long, default_value_t = 1)]
    pub every: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to the YAML plan
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Execute a CLI command, writing its output to stdout
pub fn run_command(cli: Cli) -> std::result::Result<(), String> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out).map_err(|e| format!("[{}] {e}", e.code()))
}

/// Execute a CLI command against any writer
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::Preview(args) => preview::run_preview(args, out),
        Command::Validate(args) => validate::run_validate(args, cli.quiet, out),
    }
}
