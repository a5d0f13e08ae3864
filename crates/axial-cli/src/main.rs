//! Axial Chart - Main Entry Point

use axial_cli::{load_config, run, Args, CliError, CliResult};
use axial_common::init_logging;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> CliResult<()> {
    let config = load_config(args)?;

    init_logging(args.logging_config(&config)).map_err(|e| CliError::Logging(e.to_string()))?;
    info!("Starting axial chart rendering");
    debug!(?config, "Configuration loaded");

    let stdout = io::stdout();
    run(args, &config, &mut stdout.lock())
}
