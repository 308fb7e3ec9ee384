//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_posture` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output and report files
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mail_posture::app::{render_report, render_saved};
use mail_posture::config::Opt;
use mail_posture::export::write_report;
use mail_posture::initialization::{init_crypto_provider, init_logger_with};
use mail_posture::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    // Must precede any TLS connection
    init_crypto_provider();

    match audit(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error during scan: {:#}", e);
            process::exit(1);
        }
    }
}

async fn audit(config: &Config) -> Result<()> {
    let report = run_audit(config).await?;
    print!("{}", render_report(&report, config.detailed));

    if let Some(path) = write_report(&report, config.format, &config.report_dir)? {
        println!("{}", render_saved(config.format, &path));
    }
    Ok(())
}
