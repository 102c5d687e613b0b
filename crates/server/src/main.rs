//! Business directory search server.
//!
//! Opens the SQLite record store, optionally loads an NDJSON import, and
//! serves the directory API.

use bizdir_rest::{ServerConfig, create_app_with_shared, init_logging};
use clap::Parser;
use tracing::info;

#[cfg(feature = "sqlite")]
use bizdir_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

/// Default database file when `--database-url` is not given.
const DEFAULT_DATABASE: &str = "bizdir.db";

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_deref().unwrap_or(DEFAULT_DATABASE);
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = SqliteBackend::with_config(db_path, SqliteBackendConfig::default())?;
    backend.init_schema()?;

    Ok(backend)
}

/// Loads the configured import file, if any.
async fn run_import<S>(storage: &S, config: &ServerConfig) -> anyhow::Result<()>
where
    S: bizdir_persistence::core::RecordStorage,
{
    let Some(path) = config.import_path.as_deref() else {
        return Ok(());
    };

    info!(path = %path.display(), "Importing records");
    let written = bizdir_persistence::import::import_file(storage, path)
        .await
        .map_err(|e| anyhow::anyhow!("Import of {} failed: {}", path.display(), e))?;
    info!(written, "Import complete");

    Ok(())
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Starting business directory server"
    );

    start_sqlite(config).await
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    use std::sync::Arc;

    let backend = Arc::new(create_sqlite_backend(&config)?);
    run_import(backend.as_ref(), &config).await?;

    let app = create_app_with_shared(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p bizdir-server --features sqlite"
    )
}
