//! Route configuration for the directory API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod company_routes;

pub use company_routes::create_routes;
