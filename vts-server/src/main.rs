//! vts-server - VTSearch clip browser
//!
//! Loads every dataset from `<data folder>/embeddings`, selects the default
//! dataset and serves the browsing/voting API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vts_common::config::{
    default_config_path, embeddings_dir, resolve_data_folder, TomlConfig, ENV_DATA_FOLDER,
};
use vts_common::{DatasetRegistry, EvalRegistry, JsonDirSource};
use vts_server::{build_router, open_session, AppState};

/// Command-line arguments for vts-server
#[derive(Parser, Debug)]
#[command(name = "vts-server")]
#[command(about = "Browse, vote on and evaluate embedded media clip datasets")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "VTS_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "VTS_BIND")]
    bind: std::net::IpAddr,

    /// Folder containing `embeddings/` with one JSON file per dataset
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "VTS_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset selected at startup (overrides config file)
    #[arg(long, env = "VTS_DEFAULT_DATASET")]
    default_dataset: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so the configured level applies;
    // a missing file only warns, which is replayed below once logging is up
    let config_path = args.config.clone().or_else(default_config_path);
    let config_missing = config_path.as_ref().map_or(true, |p| !p.exists());
    let config = match &config_path {
        Some(path) => TomlConfig::load(path).context("Failed to load config file")?,
        None => TomlConfig::default(),
    };

    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("vts_server={level},vts_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting VTSearch server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("VTS_GIT_HASH"),
        env!("VTS_BUILD_TIMESTAMP"),
        env!("VTS_BUILD_PROFILE")
    );
    if config_missing {
        warn!("No config file found, using defaults");
    }

    let data_folder = resolve_data_folder(args.data_folder.as_deref(), ENV_DATA_FOLDER, &config);
    let source = JsonDirSource::new(embeddings_dir(&data_folder));
    info!("Dataset folder: {}", source.dir().display());

    let registry = DatasetRegistry::load_all(&source);
    if registry.is_empty() {
        warn!("{}", "=".repeat(60));
        warn!("NO DATASETS FOUND");
        warn!(
            "Place one <name>.json dataset file per dataset in {}",
            source.dir().display()
        );
        warn!("{}", "=".repeat(60));
    } else {
        info!("✓ Loaded {} dataset(s)", registry.len());
    }

    let default_dataset = args
        .default_dataset
        .unwrap_or_else(|| config.default_dataset.clone());
    let session = open_session(registry, &default_dataset);

    let state = AppState::new(session, Arc::clone(EvalRegistry::builtin()));
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::new(args.bind, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("vts-server listening on http://{}", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
