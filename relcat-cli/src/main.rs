//! relcat - browse a catalog of release artifacts
//!
//! Reads an `{"artifacts": [...]}` document and prints facet lists or
//! filtered listings of binaries and plugins.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use relcat_core::config::RelcatConfig;

mod catalog_cli;
mod render;

use catalog_cli::CatalogSubcommand;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "relcat",
    about = "Browse release artifacts by platform, architecture, name and version",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: CatalogSubcommand,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Override configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<RelcatConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            RelcatConfig::load_from_path(&path)
        }
        None => RelcatConfig::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config = load_config(cli.config)?;
    cli.command.execute(&config)
}
