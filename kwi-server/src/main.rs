//! kwi-server - KeywordInsight keyword research demo
//!
//! Serves synthetic keyword metrics, search history, CSV export and
//! waitlist signup over HTTP. All state is in memory for the lifetime of
//! the process.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kwi_common::config::{default_config_path, ConfigOverrides, ServiceConfig, TomlConfig};
use kwi_server::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for kwi-server
#[derive(Parser, Debug)]
#[command(name = "kwi-server")]
#[command(about = "Keyword research demo service for KeywordInsight")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "KWI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "KWI_PORT")]
    port: Option<u16>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "KWI_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to config.toml
    #[arg(short, long, env = "KWI_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let loaded = match &config_path {
        Some(path) => TomlConfig::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => None,
    };
    let config_found = loaded.is_some();
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        },
        loaded.unwrap_or_default(),
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting KeywordInsight server (kwi-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) if config_found => info!("Config file: {}", path.display()),
        Some(path) => warn!("Config file not found at {} (using defaults)", path.display()),
        None => warn!("No config directory available (using defaults)"),
    }

    let state = AppState::in_memory();
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("kwi-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
