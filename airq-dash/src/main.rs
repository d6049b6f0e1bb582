//! airq-dash - UK air quality dashboard
//!
//! Serves the dashboard pages and JSON data from a read-only readings store.

use std::path::PathBuf;

use airq_common::config::{resolve_root_folder, ConfigSource, TomlConfig, ROOT_FOLDER_ENV};
use airq_common::db::connect_readonly;
use airq_dash::{build_router, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "airq-dash")]
#[command(about = "Air quality dashboard over a DEFRA readings store")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "AIRQ_CONFIG")]
    config: Option<PathBuf>,

    /// Readings database file, overriding the configured path
    #[arg(short, long, env = "AIRQ_DATABASE")]
    database: Option<PathBuf>,

    /// Root folder holding the readings database
    #[arg(short, long, env = ROOT_FOLDER_ENV)]
    root_folder: Option<PathBuf>,

    /// HTTP server port
    #[arg(short, long, env = "AIRQ_PORT")]
    port: Option<u16>,

    /// HTTP bind address
    #[arg(long, env = "AIRQ_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting airq-dash v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_source {
        ConfigSource::File(_) => info!("Using {}", config_source),
        ConfigSource::Defaults { .. } => warn!("Using {}", config_source),
    }

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
            info!("Root folder: {}", root_folder.display());
            config.database_path_in(&root_folder)
        }
    };
    info!("Database path: {}", db_path.display());

    let pool = match connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to readings store (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to open readings store: {}", e);
            return Err(e).with_context(|| format!("Cannot open {}", db_path.display()));
        }
    };

    let app = build_router(AppState::new(pool));

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("airq-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
