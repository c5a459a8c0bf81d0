//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `gremlin_import` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use gremlin_import::initialization::init_logger_with;
use gremlin_import::{run_import, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format)
        .context("Failed to initialize logger")?;

    match run_import(config).await {
        Ok(report) => {
            println!("Data import completed");
            println!("Total time: {:.3}s", report.elapsed.as_secs_f64());
            println!("Inserted elements: {}", report.successful);
            println!("Errors: {}", report.failed);
            if report.retries > 0 {
                println!("Retries: {}", report.retries);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("gremlin_import error: {:#}", e);
            process::exit(1);
        }
    }
}
