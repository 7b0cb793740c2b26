//! Students REST API server.
//!
//! Loads configuration, opens the configured student store, and serves
//! the student and todo endpoints until Ctrl+C.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use students_api::{router::Router, server::Server};
use students_core::config::{resolve_config_path, ServerConfig, StorageBackend, CONFIG_PATH_ENV};
use students_core::{MemoryStore, MemoryTodoStore, SqliteStore, StudentStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the students server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file (CONFIG_PATH takes precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    address: Option<String>,
}

/// Builds the student store selected by the config.
fn open_student_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn StudentStore>> {
    match config.storage_backend {
        StorageBackend::Sqlite => {
            let store = SqliteStore::open(&config.storage_path)
                .with_context(|| format!("failed to open storage at {}", config.storage_path))?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok(), args.config)?;
    let mut config = ServerConfig::load(&config_path)?;
    if let Some(address) = args.address {
        config.http_server.address = address;
    }
    let addr = config.http_server.bind_addr()?;

    tracing::info!(
        "Starting students server (env={}, version={}, backend={:?})",
        config.env,
        config.version.as_deref().unwrap_or("unversioned"),
        config.storage_backend
    );

    let students = open_student_store(&config)?;
    let todos = Arc::new(MemoryTodoStore::with_seed_data());
    let router = Router::new(students, todos, Arc::new(config.http_server.clone()));

    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    signal::ctrl_c()
        .await
        .context("failed to listen for ctrl_c")?;
    tracing::info!("Shutting down server...");
    server_handle.abort();

    Ok(())
}
