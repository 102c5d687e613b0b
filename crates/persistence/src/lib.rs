//! Business Directory Persistence Layer
//!
//! This crate stores business records and answers the directory's search
//! contract: filter, sort and paginate records, and compute the aggregate
//! views used by the filter dropdowns and the dashboard.
//!
//! # Features
//!
//! - **Record search**: AND-composed predicates, closed-set sort fields,
//!   offset pagination with an exact total
//! - **Aggregates**: distinct filter options and headline stats
//! - **Import**: newline-delimited JSON loaded in one transaction
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Records, filters, page requests and response envelopes
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits
//! - [`backends`] - Backend implementations
//! - [`import`] - NDJSON record import
//!
//! # Quick Start
//!
//! ```no_run
//! use bizdir_persistence::backends::sqlite::SqliteBackend;
//! use bizdir_persistence::core::{RecordStorage, SearchProvider};
//! use bizdir_persistence::types::{NewRecord, PageRequest, RecordFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! backend
//!     .insert(NewRecord::new("51824753556", "ACME PTY LTD").with_state("NSW"))
//!     .await?;
//!
//! let filter = RecordFilter::new().with_states(["NSW"]);
//! let result = backend.search(&filter, &PageRequest::new(1, 10)?).await?;
//! assert_eq!(result.total, 1);
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod import;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{BusinessRecord, PageRequest, RecordFilter, SearchEnvelope};

// Re-export core traits
pub use core::{AggregateProvider, RecordStorage, SearchProvider};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
