//! Server configuration for the business directory API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BIZDIR_SERVER_PORT` | 8080 | Server port |
//! | `BIZDIR_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `BIZDIR_LOG_LEVEL` | info | Log level |
//! | `BIZDIR_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `BIZDIR_ENABLE_CORS` | true | Enable CORS |
//! | `BIZDIR_CORS_ORIGINS` | * | Allowed origins |
//! | `BIZDIR_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `BIZDIR_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `BIZDIR_DATABASE_URL` | bizdir.db | SQLite path, or `:memory:` |
//! | `BIZDIR_IMPORT` | - | NDJSON file loaded before serving |
//! | `BIZDIR_DEFAULT_PAGE_SIZE` | 10 | Page size when `limit` is absent |
//! | `BIZDIR_MAX_PAGE_SIZE` | 100 | Larger `limit` values are clamped |
//! | `BIZDIR_ACTIVE_STATUS` | ACT | Status counted as active in stats |
//! | `BIZDIR_CANCELLED_STATUS` | CAN | Status counted as inactive in stats |
//!
//! # Example
//!
//! ```rust
//! use bizdir_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use bizdir_persistence::types::StatusCodes;
use clap::Parser;

/// Server configuration for the business directory API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "bizdir")]
#[command(about = "Business directory search server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "BIZDIR_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "BIZDIR_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "BIZDIR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "BIZDIR_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "BIZDIR_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "BIZDIR_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "BIZDIR_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "BIZDIR_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Database path (`:memory:` for an in-memory database).
    #[arg(long, env = "BIZDIR_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Newline-delimited JSON file of records to load before serving.
    #[arg(long = "import", env = "BIZDIR_IMPORT")]
    pub import_path: Option<PathBuf>,

    /// Page size used when a search omits `limit`.
    #[arg(long, env = "BIZDIR_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: u32,

    /// Largest page size served; bigger requests are clamped.
    #[arg(long, env = "BIZDIR_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u32,

    /// Status code counted as active by the stats endpoint.
    #[arg(long, env = "BIZDIR_ACTIVE_STATUS", default_value = "ACT")]
    pub active_status: String,

    /// Status code counted as inactive by the stats endpoint.
    #[arg(long, env = "BIZDIR_CANCELLED_STATUS", default_value = "CAN")]
    pub cancelled_status: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            database_url: None,
            import_path: None,
            default_page_size: 10,
            max_page_size: 100,
            active_status: "ACT".to_string(),
            cancelled_status: "CAN".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse_from(["bizdir"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the status codes the stats endpoint counts.
    pub fn status_codes(&self) -> StatusCodes {
        StatusCodes::new(&self.active_status, &self.cancelled_status)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.active_status.trim().is_empty() || self.cancelled_status.trim().is_empty() {
            errors.push("Status codes cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory database and disables CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: Some(":memory:".to_string()),
            max_page_size: 50,
            ..Default::default()
        }
    }
}
