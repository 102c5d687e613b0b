//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of all storage traits. It
//! supports both in-memory databases (great for testing) and file-based
//! databases (for development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use bizdir_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE business_records (
//!     id INTEGER PRIMARY KEY,
//!     abn TEXT NOT NULL,
//!     entity_name TEXT NOT NULL,
//!     state TEXT NOT NULL DEFAULT '',
//!     postcode TEXT NOT NULL DEFAULT '',
//!     status TEXT NOT NULL DEFAULT '',
//!     effective_from TEXT NOT NULL DEFAULT '',   -- YYYYMMDD
//!     entity_type TEXT NOT NULL DEFAULT '',
//!     record_updated TEXT NOT NULL DEFAULT '',   -- YYYYMMDD
//!     created_at TEXT NOT NULL                   -- RFC 3339, UTC
//! );
//! ```

mod backend;
mod functions;
mod schema;
pub mod search;
mod search_impl;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::{RECORDS_TABLE, SCHEMA_VERSION};
