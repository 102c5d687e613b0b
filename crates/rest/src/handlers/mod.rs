//! HTTP request handlers.
//!
//! - [`companies`] - Company search, filter options and statistics
//! - [`health`] - Health check endpoints

pub mod companies;
pub mod health;

// Re-export handlers for convenience
pub use companies::{filter_options_handler, search_handler, stats_handler};
pub use health::health_handler;
