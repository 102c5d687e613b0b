//! End-to-end tests of the HTTP client against a live directory server.

use std::sync::Arc;

use bizdir_client::{
    ClientConfig, ClientError, FetchStatus, FilterPatch, HttpSearchClient, SearchFetcher,
    SearchSession,
};
use bizdir_persistence::backends::sqlite::SqliteBackend;
use bizdir_persistence::core::RecordStorage;
use bizdir_persistence::types::{
    NewRecord, PageRequest, RecordField, RecordFilter, SortDirection,
};
use bizdir_rest::{ServerConfig, create_app_with_shared};
use chrono::{Duration, TimeZone, Utc};

/// Starts a server on an ephemeral port and returns its base URL.
async fn start_server(seed: bool) -> String {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    if seed {
        let base = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let records = [
            ("Acme Pty Ltd", "NSW", "ACT", "Australian Private Company"),
            ("Bondi Bakery", "NSW", "CAN", "Sole Trader"),
            ("Collins St Legal", "VIC", "ACT", "Australian Private Company"),
            ("Darwin Diving", "NT", "ACT", "Discretionary Trust"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, state, status, kind))| {
            NewRecord::new(format!("{i}"), *name)
                .with_state(*state)
                .with_status(*status)
                .with_entity_type(*kind)
                .with_created_at(base + Duration::minutes(i as i64))
        })
        .collect();
        backend.insert_batch(records).await.expect("Failed to seed");
    }

    serve(backend).await
}

/// Serves `backend` on an ephemeral port and returns the base URL.
async fn serve(backend: Arc<SqliteBackend>) -> String {
    let app = create_app_with_shared(backend, ServerConfig::for_testing());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpSearchClient {
    HttpSearchClient::new(ClientConfig::new(base_url)).expect("Failed to build client")
}

#[tokio::test]
async fn test_search_round_trip() {
    let base_url = start_server(true).await;
    let client = client(&base_url);

    let page = PageRequest::new(1, 2)
        .unwrap()
        .with_sort(RecordField::EntityName, SortDirection::Asc);
    let filter = RecordFilter::new().with_states(["NSW", "VIC"]);

    let envelope = client.search(&filter, &page).await.unwrap();
    assert_eq!(envelope.total, 3);
    assert_eq!(envelope.total_pages, 2);
    let names: Vec<_> = envelope.data.iter().map(|r| r.entity_name.as_str()).collect();
    assert_eq!(names, vec!["Acme Pty Ltd", "Bondi Bakery"]);
}

#[tokio::test]
async fn test_filter_options_and_stats() {
    let base_url = start_server(true).await;
    let client = client(&base_url);

    let options = client.filter_options().await.unwrap();
    assert_eq!(options.states, vec!["NSW", "NT", "VIC"]);
    assert_eq!(options.statuses, vec!["ACT", "CAN"]);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.inactive, 1);
    assert_eq!(stats.unique_states, 3);
    assert_eq!(stats.unique_entity_types, 3);
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let base_url = start_server(false).await;
    let client = client(&base_url);

    let page = PageRequest::new(1, 10).unwrap();
    let filter = RecordFilter::new().with_search("x");

    // An unknown route answers 404 without a JSON body
    let bogus = HttpSearchClient::new(ClientConfig::new(format!("{base_url}/missing"))).unwrap();
    let err = bogus.search(&filter, &page).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, .. }));

    // The live route works on an empty store
    let envelope = client.search(&filter, &page).await.unwrap();
    assert_eq!(envelope.total, 0);

    // Without a schema every query fails and the server's message comes through
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    let broken = self::client(&serve(Arc::new(backend)).await);

    let err = broken.search(&filter, &page).await.unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("Failed to fetch companies"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }

    let err = broken.stats().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "HTTP 500: Failed to fetch company statistics"
    );
}

#[tokio::test]
async fn test_session_reports_server_failure() {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    let base_url = serve(Arc::new(backend)).await;
    let config = ClientConfig::new(&base_url);
    let session = SearchSession::new(client(&base_url), &config);

    session.refetch().await;
    assert_eq!(
        session.state().status.error(),
        Some("HTTP 500: Failed to fetch companies")
    );
}

#[tokio::test]
async fn test_session_against_live_server() {
    let base_url = start_server(true).await;
    let config = ClientConfig::new(&base_url);
    let session = SearchSession::new(client(&base_url), &config);

    session.refetch().await;
    let state = session.state();
    assert_eq!(state.status, FetchStatus::Ready);
    assert_eq!(state.total, 4);
    assert_eq!(state.data[0].entity_name, "Acme Pty Ltd");

    session.update_filters(FilterPatch::new().status("ACT")).await;
    assert_eq!(session.state().total, 3);

    session.sort_by(RecordField::EntityName).await;
    let state = session.state();
    assert_eq!(state.page.sort_direction, SortDirection::Desc);
    assert_eq!(state.data[0].entity_name, "Darwin Diving");

    session.clear_filters().await;
    assert_eq!(session.state().total, 4);
}
