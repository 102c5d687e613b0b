//! Core types for the persistence layer.
//!
//! - [`BusinessRecord`], [`NewRecord`], [`RecordField`] - the record model
//! - [`RecordFilter`], [`DateRange`], [`Predicate`] - filter criteria
//! - [`PageRequest`], [`SortDirection`] - pagination and ordering
//! - [`SearchResult`], [`SearchEnvelope`] - search output
//! - [`FilterOptions`], [`RecordStats`], [`StatusCodes`] - aggregates
//!
//! # Examples
//!
//! ```
//! use bizdir_persistence::types::{
//!     DateRange, PageRequest, RecordField, RecordFilter, SortDirection,
//! };
//!
//! let filter = RecordFilter::new()
//!     .with_states(["NSW", "VIC"])
//!     .with_status("ACT")
//!     .with_effective_from(DateRange::new(Some("20200101".into()), None));
//!
//! let page = PageRequest::new(2, 10)?
//!     .with_sort(RecordField::EntityName, SortDirection::Asc);
//!
//! assert_eq!(filter.predicates().len(), 3);
//! assert_eq!(page.offset(), 10);
//! # Ok::<(), bizdir_persistence::error::SearchError>(())
//! ```

mod envelope;
mod filter;
mod pagination;
mod record;
mod summary;

pub use envelope::{SearchEnvelope, SearchResult};
pub use filter::{DateRange, Predicate, RecordFilter, fold_case};
pub use pagination::{PageRequest, SortDirection};
pub use record::{BusinessRecord, NewRecord, RecordField};
pub use summary::{FilterOptions, RecordStats, StatusCodes, distinct_count};
