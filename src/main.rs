//! dashkit server
//!
//! Run with: cargo run --bin dashkit
//!
//! # Configuration
//!
//! Read from `--config`, else the first existing file of
//! `<config dir>/dashkit/config.toml`, `/etc/dashkit/config.toml` and
//! `./dashkit.toml`. Environment variables override file values:
//! - `DASHKIT_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DASHKIT_PORT`: Port to listen on (default: 8501)
//! - `DASHKIT_SAMPLE_SEED`: Fixed seed for the sample data
//! - `DASHKIT_LOG_LEVEL`, `DASHKIT_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter, wins over the configured level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use dashkit::api::{serve, AppState};
use dashkit::config::{Config, LoadReport};

#[derive(Parser)]
#[command(name = "dashkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-page data dashboard server")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, report) = match &args.config {
        Some(path) => (
            Config::load_with_env(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            LoadReport::from_file(path),
        ),
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    dashkit::logging::init(&config.logging);
    report.log();

    tracing::info!("Starting dashkit v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        year = config.sample.year,
        seed = ?config.sample.seed,
        cache_capacity = config.sample.cache_capacity,
        "Sample data settings"
    );

    serve(AppState::new(config)).await?;

    Ok(())
}
