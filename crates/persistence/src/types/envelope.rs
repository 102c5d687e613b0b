//! Search result and response envelope types.

use serde::{Deserialize, Serialize};

use super::pagination::PageRequest;
use super::record::BusinessRecord;

/// One page of matching records plus the total over the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub records: Vec<BusinessRecord>,
    pub total: u64,
}

impl SearchResult {
    pub fn new(records: Vec<BusinessRecord>, total: u64) -> Self {
        Self { records, total }
    }
}

/// The JSON body returned by the company search endpoint.
///
/// ```json
/// { "data": [...], "total": 25, "page": 1, "limit": 10, "totalPages": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub data: Vec<BusinessRecord>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl SearchEnvelope {
    /// Wraps a store result, echoing the request's page and limit.
    pub fn new(result: SearchResult, page: &PageRequest) -> Self {
        Self {
            total_pages: page.total_pages(result.total),
            data: result.records,
            total: result.total,
            page: page.page,
            limit: page.limit,
        }
    }
}
