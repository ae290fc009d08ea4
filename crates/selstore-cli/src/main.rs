#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::io::Write;
use std::process;

use anyhow::Context;
use selstore_core::reqwest::ReqwestTransport;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "selstore_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "selstore_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "selstore_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "command failed"
        );
    }

    eprintln!("Error: {error:#}");
    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let transport = ReqwestTransport::new(cli.transport.clone())
        .context("failed to create storage transport")?
        .into_service();

    let output = match &cli.command {
        Command::List(args) => commands::list(args, transport).await?,
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output).context("failed to write output")?;
    writeln!(stdout).context("failed to write output")?;

    Ok(())
}
