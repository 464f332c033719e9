//! $BISOU frame server - Farcaster Frame and browser app for a demo token.

use anyhow::Result;
use bisou_server::{config, logging, routes, state};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use config::{Config, StorageBackend};
use logging::{LogConfig, LogFormat};
use state::AppState;

/// $BISOU frame server.
#[derive(Parser, Debug)]
#[command(name = "bisou-server")]
#[command(about = "Farcaster Frame and web app for buying $BISOU (simulated)")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the public base URL used in frame meta tags
    #[arg(long, value_name = "URL")]
    public_url: Option<String>,

    /// Override the interaction log backend
    #[arg(long, value_enum)]
    storage: Option<StorageBackend>,

    /// Enable verbose logging (INFO level for all targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (TRACE level for everything)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "frame=debug" or "image=trace").
    /// Can be specified multiple times. Targets are prefixed with "bisou::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = cli.public_url {
        config.public_url = Some(url);
    }
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }

    tracing::info!(
        target: "bisou::startup",
        "Loaded configuration (port: {}, storage: {:?}, env: {})",
        config.port,
        config.storage,
        config.env
    );

    let state = Arc::new(AppState::new(config.clone())?);
    if state.token_image.is_remote() {
        tracing::info!(target: "bisou::startup", "Initial frame image will be fetched remotely");
    }

    let app = routes::router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "bisou::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
