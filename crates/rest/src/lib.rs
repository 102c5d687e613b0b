//! # bizdir-rest - Business Directory HTTP API
//!
//! This crate exposes the business directory store over HTTP: a filtered,
//! sorted, paginated company search plus the two aggregates the search UI
//! needs to draw its filter panel and dashboard.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bizdir_rest::{create_app, ServerConfig};
//! use bizdir_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("bizdir.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Response |
//! |----------|--------|----------|
//! | `/companies` | GET | `{data, total, page, limit, totalPages}` |
//! | `/companies/filter-options` | GET | `{states, statuses, entityTypes}` |
//! | `/companies/stats` | GET | `{total, active, inactive, uniqueStates, uniqueEntityTypes}` |
//! | `/health` | GET | backend name and timestamp |
//! | `/_liveness` | GET | 200 |
//! | `/_readiness` | GET | 200, or 503 when the store is unreachable |
//!
//! ### Search parameters
//!
//! `search`, `states` (repeatable), `postcode`, `status`, `entityTypes`
//! (repeatable), `effectiveFromStart`, `effectiveFromEnd`,
//! `recordUpdatedStart`, `recordUpdatedEnd`, `page`, `limit`, `sortField`,
//! `sortDirection`. Dates are `YYYYMMDD` strings.
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<message>"}`. Store failures map to a
//! fixed message per endpoint with HTTP 500; the cause is only logged.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and response mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`extractors`] - Query string parsing
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use bizdir_persistence::core::{AggregateProvider, SearchProvider};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: SearchProvider + AggregateProvider + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use bizdir_rest::{create_app_with_config, ServerConfig};
/// use bizdir_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// backend.init_schema()?;
/// let config = ServerConfig {
///     max_page_size: 50,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: SearchProvider + AggregateProvider + Send + Sync + 'static,
{
    create_app_with_shared(Arc::new(storage), config)
}

/// Creates the Axum application around an already shared backend.
///
/// Useful when the caller keeps its own handle to the store, as the server
/// binary does for imports and tests do for seeding.
pub fn create_app_with_shared<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: SearchProvider + AggregateProvider + Send + Sync + 'static,
{
    info!(
        backend = storage.backend_name(),
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating directory API"
    );

    let state = AppState::new(storage, config.clone());

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bizdir={level},bizdir_rest={level},bizdir_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
