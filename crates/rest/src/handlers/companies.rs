//! Company search, filter options and statistics handlers.

use axum::{Json, extract::State};
use bizdir_persistence::core::{AggregateProvider, SearchProvider};
use bizdir_persistence::types::{FilterOptions, RecordStats, SearchEnvelope};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::CompanyQuery;
use crate::state::AppState;

const SEARCH_FAILED: &str = "Failed to fetch companies";
const FILTER_OPTIONS_FAILED: &str = "Failed to fetch filter options";
const STATS_FAILED: &str = "Failed to fetch company statistics";

/// Handler for the company search.
///
/// # HTTP Request
///
/// `GET [base]/companies?search=...&states=NSW&states=VIC&page=2&limit=10`
///
/// # Response
///
/// - `200 OK` - `{data, total, page, limit, totalPages}`
/// - `400 Bad Request` - Malformed paging or sort parameters
/// - `500 Internal Server Error` - `{"error": "Failed to fetch companies"}`
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    query: CompanyQuery,
) -> RestResult<Json<SearchEnvelope>>
where
    S: SearchProvider + Send + Sync,
{
    let filter = query.filter();
    let page = query.page_request(state.default_page_size(), state.max_page_size())?;

    debug!(
        predicates = filter.predicates().len(),
        page = page.page,
        limit = page.limit,
        sort_field = ?page.sort_field,
        sort_direction = %page.sort_direction.as_str(),
        "Processing company search"
    );

    let result = state
        .storage()
        .search(&filter, &page)
        .await
        .map_err(|e| RestError::query_failed(SEARCH_FAILED, e))?;

    debug!(
        returned = result.records.len(),
        total = result.total,
        "Company search complete"
    );

    Ok(Json(SearchEnvelope::new(result, &page)))
}

/// Handler for the distinct filter values.
///
/// # HTTP Request
///
/// `GET [base]/companies/filter-options`
///
/// # Response
///
/// - `200 OK` - `{states, statuses, entityTypes}`, each sorted and distinct
/// - `500 Internal Server Error` - `{"error": "Failed to fetch filter options"}`
pub async fn filter_options_handler<S>(
    State(state): State<AppState<S>>,
) -> RestResult<Json<FilterOptions>>
where
    S: AggregateProvider + Send + Sync,
{
    debug!("Processing filter options request");

    let options = state
        .storage()
        .filter_options()
        .await
        .map_err(|e| RestError::query_failed(FILTER_OPTIONS_FAILED, e))?;

    Ok(Json(options))
}

/// Handler for the dashboard statistics.
///
/// # HTTP Request
///
/// `GET [base]/companies/stats`
///
/// # Response
///
/// - `200 OK` - `{total, active, inactive, uniqueStates, uniqueEntityTypes}`
/// - `500 Internal Server Error` - `{"error": "Failed to fetch company statistics"}`
pub async fn stats_handler<S>(State(state): State<AppState<S>>) -> RestResult<Json<RecordStats>>
where
    S: AggregateProvider + Send + Sync,
{
    debug!("Processing company statistics request");

    let stats = state
        .storage()
        .stats(&state.status_codes())
        .await
        .map_err(|e| RestError::query_failed(STATS_FAILED, e))?;

    Ok(Json(stats))
}
