//! Kerosene CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the hyperparameters at every step of a plan
//! kerosene preview plan.yaml
//!
//! # Validate a plan
//! kerosene validate plan.yaml
//! ```
//!
//! `-v` enables debug logging and `-q` keeps only errors; `RUST_LOG`
//! overrides both.

use clap::Parser;
use kerosene::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new().filter_level(cli.log_filter()).parse_default_env().init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
