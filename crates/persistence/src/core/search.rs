//! Search provider trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{PageRequest, RecordFilter, SearchResult};

use super::storage::RecordStorage;

/// Filtered, sorted, paginated record search.
///
/// Implementations push all filtering, ordering and counting down into the
/// store. A failure at any step aborts the whole search; there are no
/// partial results.
#[async_trait]
pub trait SearchProvider: RecordStorage {
    /// Returns one page of matching records and the total over all pages.
    ///
    /// Every predicate of `filter` is ANDed. Rows are ordered by
    /// `page.sort_field` with `id` as tie-breaker, or by `created_at`
    /// descending when no sort field is given.
    async fn search(&self, filter: &RecordFilter, page: &PageRequest)
    -> StorageResult<SearchResult>;

    /// Counts records matching the filter without fetching them.
    async fn search_count(&self, filter: &RecordFilter) -> StorageResult<u64>;
}
