//! relcat catalog commands
//!
//! Each command loads an artifact document (a file, or stdin for `-`) and
//! prints facets or listings to stdout. Logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use relcat_core::artifact::{ArtifactFilter, Platform};
use relcat_core::catalog::{CatalogLoader, LoadPolicy, LoadedCatalog};
use relcat_core::config::RelcatConfig;

use crate::render;

/// Facet value that leaves a facet unconstrained
pub const ALL: &str = "all";

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// Show the values available for each facet
    Facets {
        /// Artifact document, or '-' for stdin
        input: PathBuf,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// List binaries and plugins matching a facet selection
    List(ListArgs),

    /// Validate every path in a document and report the ones that fail
    Check {
        /// Artifact document, or '-' for stdin
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Artifact document, or '-' for stdin
    pub input: PathBuf,

    /// Platform (darwin, linux, windows)
    #[clap(long, default_value = ALL)]
    pub platform: String,

    /// Architecture
    #[clap(long, default_value = ALL)]
    pub arch: String,

    /// Binary name
    #[clap(long, default_value = ALL)]
    pub binary: String,

    /// Binary release line, e.g. 1.12
    #[clap(long, default_value = ALL)]
    pub cli: String,

    /// Plugin name
    #[clap(long, default_value = ALL)]
    pub plugin: String,

    /// Platform version the plugins target, e.g. 1.12
    #[clap(long, default_value = ALL)]
    pub dcos: String,

    /// Output format
    #[clap(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Html,
}

impl CatalogSubcommand {
    pub fn execute(self, config: &RelcatConfig) -> Result<()> {
        match self {
            CatalogSubcommand::Facets { input, json } => execute_facets(config, &input, json),
            CatalogSubcommand::List(args) => execute_list(config, &args),
            CatalogSubcommand::Check { input } => execute_check(config, &input),
        }
    }
}

/// `None` for the "all" sentinel, the value otherwise
fn selected(value: &str) -> Option<&str> {
    if value == ALL {
        None
    } else {
        Some(value)
    }
}

impl ListArgs {
    /// Filters for the binary and plugin listings
    pub fn filters(&self) -> Result<(ArtifactFilter, ArtifactFilter)> {
        let platform = selected(&self.platform)
            .map(|p| p.parse::<Platform>())
            .transpose()
            .map_err(anyhow::Error::msg)?;

        let shared = ArtifactFilter {
            platform,
            architecture: selected(&self.arch).map(str::to_string),
            ..ArtifactFilter::default()
        };

        let binaries = ArtifactFilter {
            name: selected(&self.binary).map(str::to_string),
            release: selected(&self.cli).map(str::to_string),
            ..shared.clone()
        };
        let plugins = ArtifactFilter {
            name: selected(&self.plugin).map(str::to_string),
            release: selected(&self.dcos).map(str::to_string),
            ..shared
        };
        Ok((binaries, plugins))
    }
}

fn load(loader: &CatalogLoader, input: &Path) -> Result<LoadedCatalog> {
    if input == Path::new("-") {
        debug!("Reading artifact document from stdin");
        loader
            .load_reader(io::stdin().lock())
            .context("Failed to load artifact document from stdin")
    } else {
        loader
            .load_path(input)
            .with_context(|| format!("Failed to load artifact document: {}", input.display()))
    }
}

fn execute_facets(config: &RelcatConfig, input: &Path, json_output: bool) -> Result<()> {
    let loaded = load(&CatalogLoader::from_config(config), input)?;

    if json_output {
        let output = render::facets_json(&loaded.collection)?;
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render::facets_table(&loaded.collection));
    }
    Ok(())
}

fn execute_list(config: &RelcatConfig, args: &ListArgs) -> Result<()> {
    let (binary_filter, plugin_filter) = args.filters()?;
    let loaded = load(&CatalogLoader::from_config(config), &args.input)?;

    let binaries = loaded.collection.binaries().filter(&binary_filter);
    let plugins = loaded.collection.plugins().filter(&plugin_filter);
    debug!(
        binaries = binaries.len(),
        plugins = plugins.len(),
        "Filtered listings"
    );

    match args.format {
        OutputFormat::Json => {
            let output = render::listing_json(&binaries, &plugins)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Html => {
            println!("<h2>Binaries</h2>");
            println!("{}", render::listing_html(&binaries));
            println!("<h2>Plugins</h2>");
            println!("{}", render::listing_html(&plugins));
        }
        OutputFormat::Table => {
            if binaries.is_empty() && plugins.is_empty() {
                println!("No artifacts match the selection.");
                return Ok(());
            }
            if !binaries.is_empty() {
                println!("Binaries ({}):\n", binaries.len());
                println!("{}\n", render::listing_table(&binaries));
            }
            if !plugins.is_empty() {
                println!("Plugins ({}):\n", plugins.len());
                println!("{}", render::listing_table(&plugins));
            }
        }
    }
    Ok(())
}

fn execute_check(config: &RelcatConfig, input: &Path) -> Result<()> {
    let loader = CatalogLoader::from_config(config).with_policy(LoadPolicy::Skip);
    let loaded = load(&loader, input)?;

    for error in &loaded.rejected {
        println!("✗ {error}");
    }

    let total = loaded.collection.len() + loaded.rejected.len();
    if loaded.rejected.is_empty() {
        println!("✓ All {total} artifact path(s) are valid");
        Ok(())
    } else {
        bail!(
            "{} of {} artifact path(s) do not follow the release scheme",
            loaded.rejected.len(),
            total
        )
    }
}
