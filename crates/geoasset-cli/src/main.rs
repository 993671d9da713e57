//! GeoAsset CLI - Command-line tool for the GeoAsset service
//!
//! Upload company asset files, list stored assets and follow changes.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoasset_client::AssetClient;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "geoasset-cli")]
#[command(author, version, about = "GeoAsset company asset CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL [default: http://localhost:3000]
    #[arg(short, long, env = "GEOASSET_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "GEOASSET_CONFIG")]
    config: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored assets
    List {
        /// Only show assets of this company
        #[arg(long)]
        company: Option<String>,
    },

    /// Upload an asset file, replacing the company's assets
    Upload {
        /// Company the assets belong to
        company_id: String,

        /// JSON file holding an array of assets
        file: PathBuf,

        /// Replace existing assets without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Follow asset changes (SSE)
    Watch {
        /// Only show changes for this company
        #[arg(long)]
        company: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(cli.server.as_deref(), cli.output, cli.no_color);

    // Create output context
    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let client = create_client(&merged.server)?;

    match &cli.command {
        Commands::List { company } => {
            commands::list(&client, company.as_deref(), &ctx).await?;
        }

        Commands::Upload {
            company_id,
            file,
            yes,
        } => {
            commands::upload(&client, company_id, file, *yes, &ctx).await?;
        }

        Commands::Watch { company } => {
            commands::watch(&client, company.as_deref(), &ctx).await?;
        }
    }

    Ok(())
}

/// Create a GeoAsset client for the given server URL
fn create_client(server: &str) -> Result<AssetClient> {
    AssetClient::new(server).context("Failed to create GeoAsset client")
}
