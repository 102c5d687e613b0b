//! SQLite search support.
//!
//! The query builder turns record filters and page requests into
//! parameterised SQL over the `business_records` table.

pub mod query_builder;

pub use query_builder::{QueryBuilder, RECORD_COLUMNS, SqlFragment, SqlParam, escape_like};
