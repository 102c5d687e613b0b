//! Company directory route configuration.

use axum::{Router, routing::get};
use bizdir_persistence::core::{AggregateProvider, SearchProvider};

use crate::handlers;
use crate::state::AppState;

/// Creates all directory API routes.
///
/// # Routes
///
/// - `GET /companies` - Filtered, sorted, paginated search
/// - `GET /companies/filter-options` - Distinct filter values
/// - `GET /companies/stats` - Dashboard statistics
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: SearchProvider + AggregateProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/companies", get(handlers::search_handler::<S>))
        .route(
            "/companies/filter-options",
            get(handlers::filter_options_handler::<S>),
        )
        .route("/companies/stats", get(handlers::stats_handler::<S>))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::health::liveness_handler))
        .route("/_readiness", get(handlers::health::readiness_handler::<S>))
        .with_state(state)
}
