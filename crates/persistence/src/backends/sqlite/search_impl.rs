//! Search and aggregation implementation for the SQLite backend.

use async_trait::async_trait;

use crate::core::{AggregateProvider, SearchProvider};
use crate::error::StorageResult;
use crate::types::{PageRequest, RecordFilter, SearchResult};

use super::SqliteBackend;
use super::backend::{internal_error, row_to_record};
use super::search::QueryBuilder;

#[async_trait]
impl SearchProvider for SqliteBackend {
    async fn search(
        &self,
        filter: &RecordFilter,
        page: &PageRequest,
    ) -> StorageResult<SearchResult> {
        let conn = self.get_connection()?;
        let builder = QueryBuilder::new(filter);

        let select = builder.build_select(page);
        tracing::debug!(sql = %select.sql, params = select.params.len(), "Executing record search");

        let all_params = select.boxed_params();
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            all_params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn
            .prepare(&select.sql)
            .map_err(|e| internal_error(format!("Failed to prepare search: {}", e)))?;
        let records = stmt
            .query_map(param_refs.as_slice(), row_to_record)
            .map_err(|e| internal_error(format!("Failed to execute search: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read search row: {}", e)))?;

        let count = builder.build_count();
        let count_params = count.boxed_params();
        let count_refs: Vec<&dyn rusqlite::ToSql> =
            count_params.iter().map(|p| p.as_ref()).collect();

        let total: i64 = conn
            .query_row(&count.sql, count_refs.as_slice(), |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count records: {}", e)))?;

        Ok(SearchResult::new(records, total as u64))
    }

    async fn search_count(&self, filter: &RecordFilter) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count = QueryBuilder::new(filter).build_count();

        let all_params = count.boxed_params();
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            all_params.iter().map(|p| p.as_ref()).collect();

        let total: i64 = conn
            .query_row(&count.sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count records: {}", e)))?;

        Ok(total as u64)
    }
}

#[async_trait]
impl AggregateProvider for SqliteBackend {
    async fn count_by_status(&self, status: &str) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM business_records WHERE status = ?1",
                [status],
                |row| row.get(0),
            )
            .map_err(|e| internal_error(format!("Failed to count by status: {}", e)))?;

        Ok(count as u64)
    }

    async fn project_filter_columns(&self) -> StorageResult<Vec<(String, String, String)>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT state, status, entity_type FROM business_records")
            .map_err(|e| internal_error(format!("Failed to prepare projection: {}", e)))?;

        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(|e| internal_error(format!("Failed to project filter columns: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read projection row: {}", e)))
    }

    async fn project_state_and_type(&self) -> StorageResult<Vec<(String, String)>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT state, entity_type FROM business_records")
            .map_err(|e| internal_error(format!("Failed to prepare projection: {}", e)))?;

        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(|e| internal_error(format!("Failed to project state and type: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read projection row: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordStorage;
    use crate::types::{DateRange, NewRecord, RecordField, SortDirection, StatusCodes};
    use chrono::{Duration, TimeZone, Utc};

    fn create_test_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    async fn seed(backend: &SqliteBackend) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rows = [
            ("Acme Holdings", "NSW", "2000", "ACT", "20200101", "Australian Private Company"),
            ("Beta 100% Trust", "VIC", "3000", "ACT", "20200615", "Discretionary Trust"),
            ("Gamma_Group", "QLD", "4000", "CAN", "20201231", "Australian Private Company"),
            ("delta widgets", "NSW", "2001", "CAN", "20210101", "Sole Trader"),
        ];
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, (name, state, postcode, status, eff, ty))| {
                NewRecord::new(format!("{}", 1000 + i), *name)
                    .with_state(*state)
                    .with_postcode(*postcode)
                    .with_status(*status)
                    .with_effective_from(*eff)
                    .with_entity_type(*ty)
                    .with_record_updated("20240101")
                    .with_created_at(base + Duration::minutes(i as i64))
            })
            .collect();
        backend.insert_batch(records).await.unwrap();
    }

    fn names(result: &SearchResult) -> Vec<&str> {
        result.records.iter().map(|r| r.entity_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_newest_first() {
        let backend = create_test_backend();
        seed(&backend).await;

        let result = backend
            .search(&RecordFilter::new(), &PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(result.total, 4);
        assert_eq!(
            names(&result),
            vec!["delta widgets", "Gamma_Group", "Beta 100% Trust", "Acme Holdings"]
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_and_type() {
        let backend = create_test_backend();
        seed(&backend).await;

        let filter = RecordFilter::new().with_search("ACME");
        let result = backend
            .search(&filter, &PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(names(&result), vec!["Acme Holdings"]);

        let filter = RecordFilter::new().with_search("private");
        assert_eq!(backend.search_count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_like_wildcards_match_literally() {
        let backend = create_test_backend();
        seed(&backend).await;

        let filter = RecordFilter::new().with_search("100%");
        assert_eq!(backend.search_count(&filter).await.unwrap(), 1);

        let filter = RecordFilter::new().with_search("a_g");
        assert_eq!(backend.search_count(&filter).await.unwrap(), 1);

        let filter = RecordFilter::new().with_search("%");
        assert_eq!(backend.search_count(&filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rows_satisfy_every_predicate() {
        let backend = create_test_backend();
        seed(&backend).await;

        let filter = RecordFilter::new()
            .with_states(["NSW", "QLD"])
            .with_status("CAN");
        let result = backend
            .search(&filter, &PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        assert!(result.records.iter().all(|r| filter.matches(r)));
    }

    #[tokio::test]
    async fn test_effective_range_inclusive() {
        let backend = create_test_backend();
        seed(&backend).await;

        let filter = RecordFilter::new().with_effective_from(DateRange::new(
            Some("20200101".into()),
            Some("20201231".into()),
        ));
        assert_eq!(backend.search_count(&filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_sort_with_tiebreaker() {
        let backend = create_test_backend();
        seed(&backend).await;

        let page = PageRequest::new(1, 10)
            .unwrap()
            .with_sort(RecordField::State, SortDirection::Asc);
        let result = backend.search(&RecordFilter::new(), &page).await.unwrap();

        let states: Vec<&str> = result.records.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["NSW", "NSW", "QLD", "VIC"]);
        // Equal states fall back to id order
        assert!(result.records[0].id < result.records[1].id);
    }

    #[tokio::test]
    async fn test_pagination_total_is_stable() {
        let backend = create_test_backend();
        seed(&backend).await;

        let first = backend
            .search(&RecordFilter::new(), &PageRequest::new(1, 3).unwrap())
            .await
            .unwrap();
        let second = backend
            .search(&RecordFilter::new(), &PageRequest::new(2, 3).unwrap())
            .await
            .unwrap();
        let beyond = backend
            .search(&RecordFilter::new(), &PageRequest::new(5, 3).unwrap())
            .await
            .unwrap();

        assert_eq!(first.records.len(), 3);
        assert_eq!(second.records.len(), 1);
        assert!(beyond.records.is_empty());
        assert_eq!(first.total, 4);
        assert_eq!(second.total, 4);
        assert_eq!(beyond.total, 4);
    }

    #[tokio::test]
    async fn test_filter_options() {
        let backend = create_test_backend();
        seed(&backend).await;

        let options = backend.filter_options().await.unwrap();
        assert_eq!(options.states, vec!["NSW", "QLD", "VIC"]);
        assert_eq!(options.statuses, vec!["ACT", "CAN"]);
        assert_eq!(
            options.entity_types,
            vec![
                "Australian Private Company",
                "Discretionary Trust",
                "Sole Trader"
            ]
        );
    }

    #[tokio::test]
    async fn test_filter_options_empty_table() {
        let backend = create_test_backend();
        let options = backend.filter_options().await.unwrap();

        assert!(options.states.is_empty());
        assert!(options.statuses.is_empty());
        assert!(options.entity_types.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let backend = create_test_backend();
        seed(&backend).await;

        let stats = backend.stats(&StatusCodes::default()).await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 2);
        assert_eq!(stats.unique_states, 3);
        assert_eq!(stats.unique_entity_types, 3);
    }

    #[tokio::test]
    async fn test_stats_with_custom_codes() {
        let backend = create_test_backend();
        seed(&backend).await;

        let stats = backend
            .stats(&StatusCodes::new("CAN", "DEREG"))
            .await
            .unwrap();
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 0);
    }

    #[tokio::test]
    async fn test_search_fails_without_schema() {
        let backend = SqliteBackend::in_memory().unwrap();
        let result = backend
            .search(&RecordFilter::new(), &PageRequest::new(1, 10).unwrap())
            .await;
        assert!(result.is_err());
    }
}
