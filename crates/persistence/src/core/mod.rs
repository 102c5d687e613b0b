//! Core storage traits and abstractions.
//!
//! - [`RecordStorage`] - insert, read and count records
//! - [`SearchProvider`] - filtered, sorted, paginated search
//! - [`AggregateProvider`] - filter options and dashboard stats
//!
//! # Trait Hierarchy
//!
//! ```text
//! RecordStorage
//!     ├── SearchProvider
//!     └── AggregateProvider
//! ```

mod aggregate;
mod search;
mod storage;

pub use aggregate::AggregateProvider;
pub use search::SearchProvider;
pub use storage::RecordStorage;
