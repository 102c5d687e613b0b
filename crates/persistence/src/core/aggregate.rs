//! Whole-table aggregation trait.
//!
//! Backends supply three primitive scans; the filter-option and stats views
//! are composed from them here so every backend reduces rows the same way.

use async_trait::async_trait;
use tracing::debug;

use crate::error::StorageResult;
use crate::types::{FilterOptions, RecordStats, StatusCodes, distinct_count};

use super::storage::RecordStorage;

/// Aggregations over every record in the store.
///
/// These are full-table scans. There is no caching; each call reads the
/// current table.
#[async_trait]
pub trait AggregateProvider: RecordStorage {
    /// Counts records whose status equals `status` exactly.
    async fn count_by_status(&self, status: &str) -> StorageResult<u64>;

    /// Projects `(state, status, entity_type)` for every record.
    async fn project_filter_columns(&self) -> StorageResult<Vec<(String, String, String)>>;

    /// Projects `(state, entity_type)` for every record.
    async fn project_state_and_type(&self) -> StorageResult<Vec<(String, String)>>;

    /// Distinct non-blank states, statuses and entity types, each sorted.
    async fn filter_options(&self) -> StorageResult<FilterOptions> {
        let rows = self.project_filter_columns().await?;
        debug!(rows = rows.len(), "Reducing filter options");
        Ok(FilterOptions::from_rows(rows))
    }

    /// Totals and distinct counts for the dashboard.
    ///
    /// Runs four independent store operations; any failure aborts the whole
    /// computation.
    async fn stats(&self, codes: &StatusCodes) -> StorageResult<RecordStats> {
        let total = self.count().await?;
        let active = self.count_by_status(&codes.active).await?;
        let inactive = self.count_by_status(&codes.cancelled).await?;
        let (states, entity_types): (Vec<String>, Vec<String>) =
            self.project_state_and_type().await?.into_iter().unzip();

        Ok(RecordStats {
            total,
            active,
            inactive,
            unique_states: distinct_count(states),
            unique_entity_types: distinct_count(entity_types),
        })
    }
}
