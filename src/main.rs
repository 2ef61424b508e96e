//! Chartboard Server
//!
//! Run with: cargo run --bin chartboard -- [--config path/to/config.toml]
//!
//! # Configuration
//!
//! Without `--config`, the first file found among
//! `~/.config/chartboard/config.toml`, `/etc/chartboard/config.toml` and
//! `./config.toml` is used. Environment variables override it:
//! - `CHARTBOARD_HOST`: Host to bind to (default: 127.0.0.1)
//! - `CHARTBOARD_PORT`: Port to listen on (default: 8050)
//! - `CHARTBOARD_MAX_UPLOAD_BYTES`: Request body limit (default: 10 MB)
//! - `CHARTBOARD_LOG_LEVEL`, `CHARTBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, overrides the log level

use anyhow::Context;
use chartboard::api::{serve, AppState};
use chartboard::config::Config;
use chartboard::telemetry::init_logging;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chartboard", version, about = "CSV upload and chart dashboard")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Starting Chartboard v{}", env!("CARGO_PKG_VERSION"));

    let api_config = config.api_config();
    let dashboard_config = config.dashboard_config();

    tracing::info!(
        default_kind = %dashboard_config.default_kind,
        max_sessions = dashboard_config.max_sessions,
        max_upload_bytes = api_config.max_upload_bytes,
        "Dashboard configured"
    );

    let state = AppState::with_dashboard_config(api_config.clone(), dashboard_config);
    serve(state, &api_config).await?;

    tracing::info!("Chartboard stopped");
    Ok(())
}
