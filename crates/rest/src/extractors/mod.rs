//! Axum extractors for the business directory API.
//!
//! - [`CompanyQuery`] - Extract and parse company search parameters

mod company_query;

pub use company_query::{CompanyQuery, MULTI_VALUED_PARAMS, ParamValue};
