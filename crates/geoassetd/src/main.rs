//! geoassetd - GeoAsset Server Daemon
//!
//! Serves the GeoAsset REST API over one in-memory asset store.
//!
//! Usage:
//!   geoassetd [OPTIONS] [config.toml]
//!
//! Without a config file every setting takes its default and the server
//! listens on 0.0.0.0:3000.

mod config;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use geoasset_api::{create_router, AppState};
use geoasset_core::AssetStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DaemonConfig, LoggingConfig, Overrides};

/// GeoAsset Server Daemon
#[derive(Parser, Debug)]
#[command(name = "geoassetd")]
#[command(version, about)]
struct Args {
    /// Server config file (TOML)
    #[arg(value_name = "CONFIG")]
    config_path: Option<PathBuf>,

    /// Server config file (TOML), same as the positional argument
    #[arg(long = "config", short = 'c', conflicts_with = "config_path")]
    config_flag: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "GEOASSET_HOST")]
    host: Option<IpAddr>,

    /// Port to listen on
    #[arg(long, short, env = "GEOASSET_PORT")]
    port: Option<u16>,

    /// Reject coordinates outside the valid latitude/longitude ranges
    #[arg(long, env = "GEOASSET_STRICT_COORDINATES")]
    strict_coordinates: bool,

    /// Log as JSON lines
    #[arg(long, env = "GEOASSET_LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn config_file(&self) -> Option<&PathBuf> {
        self.config_path.as_ref().or(self.config_flag.as_ref())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host,
            port: self.port,
            strict_coordinates: self.strict_coordinates,
            log_json: self.log_json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match args.config_file() {
        Some(path) => DaemonConfig::load(path)?,
        None => DaemonConfig::default(),
    };
    config.apply(&args.overrides());

    init_logging(&config.logging);

    tracing::info!("Starting geoassetd (GeoAsset Server Daemon)");
    match args.config_file() {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file provided, using defaults"),
    }

    let api_config = config.api_config();
    tracing::info!(
        max_upload_bytes = api_config.max_upload_bytes,
        coordinates = ?api_config.coordinates,
        "Upload settings"
    );

    // One store for the lifetime of the process
    let store = Arc::new(AssetStore::new());
    let state = AppState::with_config(store, api_config);
    let app = create_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize tracing; `RUST_LOG` takes precedence over the configured filter
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
