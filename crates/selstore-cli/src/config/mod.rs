//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── transport: ReqwestConfig   # Base URL, token, timeout, user agent
//! └── command: Command
//!     └── list: ListingArgs      # Container and listing filters
//! ```
//!
//! Transport options can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! selstore --base-url https://api.selcdn.ru/v1/SEL_1 list photos --directory 2024
//!
//! # Or via environment variables
//! SELSTORE_BASE_URL=https://api.selcdn.ru/v1/SEL_1 SELSTORE_AUTH_TOKEN=... selstore list photos
//! ```

mod listing;

use std::process;

use clap::{Parser, Subcommand};
pub use listing::ListingArgs;
use selstore_core::reqwest::ReqwestConfig;
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "selstore")]
#[command(about = "List Selectel object storage containers")]
#[command(version)]
pub struct Cli {
    /// Storage API transport configuration.
    #[clap(flatten)]
    pub transport: ReqwestConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// List the files of a container as JSON.
    List(ListingArgs),
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// .env files are loaded before clap parses arguments so that their
    /// values act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.transport.base_url,
            has_token = self.transport.auth_token.is_some(),
            http_timeout_secs = self.transport.http_timeout,
            "Transport configuration"
        );

        match &self.command {
            Command::List(args) => args.log(),
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_list_command() {
        let cli = parse(&[
            "selstore",
            "--base-url",
            "https://api.selcdn.ru/v1/SEL_1",
            "--http-timeout",
            "5",
            "list",
            "photos",
            "--directory",
            "/2024",
            "--prefix",
            "cat-",
            "--limit",
            "10",
            "--marker",
            "cat-0009.jpg",
            "--objects",
        ]);

        assert_eq!(cli.transport.http_timeout, 5);
        let Command::List(args) = cli.command;
        assert_eq!(args.container, "photos");
        assert_eq!(args.directory.as_deref(), Some("/2024"));
        assert_eq!(args.limit, Some(10));
        assert_eq!(args.marker.as_deref(), Some("cat-0009.jpg"));
        assert!(args.objects);
    }

    #[test]
    fn test_marker_requires_limit() {
        let result = Cli::try_parse_from([
            "selstore",
            "--base-url",
            "https://api.selcdn.ru/v1/SEL_1",
            "list",
            "photos",
            "--marker",
            "a.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_url_is_validated() {
        let result = Cli::try_parse_from(["selstore", "--base-url", "nope", "list", "photos"]);
        assert!(result.is_err());
    }
}
