//! Shared test infrastructure for the directory API.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use bizdir_persistence::backends::sqlite::SqliteBackend;
use bizdir_persistence::core::RecordStorage;
use bizdir_persistence::types::NewRecord;
use bizdir_rest::{ServerConfig, create_app_with_shared};
use chrono::{Duration, TimeZone, Utc};

/// Creates a test server over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with a custom configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let app = create_app_with_shared(Arc::clone(&backend), config);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

/// Creates a test server whose store has no schema, so every query fails.
pub fn create_broken_server() -> TestServer {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    let app = create_app_with_shared(Arc::new(backend), ServerConfig::for_testing());
    TestServer::new(app).expect("Failed to create test server")
}

/// Seeds a small directory.
///
/// | abn | name | state | status | postcode | type | effective | created |
/// |-----|------|-------|--------|----------|------|-----------|---------|
/// | 1 | Acme Pty Ltd | NSW | ACT | 2000 | Australian Private Company | 20190115 | +0m |
/// | 2 | Bondi Bakery | NSW | CAN | 2026 | Sole Trader | 20200301 | +1m |
/// | 3 | Collins St Legal | VIC | ACT | 3000 | Australian Private Company | 20200615 | +2m |
/// | 4 | Darwin Diving | NT | ACT | 0800 | Discretionary Trust | 20210101 | +3m |
/// | 5 | Eagle Farm 100% Organic | QLD | ACT | 4009 | Discretionary Trust | 20211231 | +4m |
/// | 6 | Fremantle_Freight | WA | CAN | 6160 | Australian Private Company | 20220505 | +5m |
pub async fn seed_directory(backend: &SqliteBackend) {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let rows = [
        ("1", "Acme Pty Ltd", "NSW", "ACT", "2000", "Australian Private Company", "20190115"),
        ("2", "Bondi Bakery", "NSW", "CAN", "2026", "Sole Trader", "20200301"),
        ("3", "Collins St Legal", "VIC", "ACT", "3000", "Australian Private Company", "20200615"),
        ("4", "Darwin Diving", "NT", "ACT", "0800", "Discretionary Trust", "20210101"),
        ("5", "Eagle Farm 100% Organic", "QLD", "ACT", "4009", "Discretionary Trust", "20211231"),
        ("6", "Fremantle_Freight", "WA", "CAN", "6160", "Australian Private Company", "20220505"),
    ];

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, (abn, name, state, status, postcode, kind, effective))| {
            NewRecord::new(*abn, *name)
                .with_state(*state)
                .with_status(*status)
                .with_postcode(*postcode)
                .with_entity_type(*kind)
                .with_effective_from(*effective)
                .with_record_updated("20240401")
                .with_created_at(base + Duration::minutes(i as i64))
        })
        .collect();

    backend.insert_batch(records).await.expect("Failed to seed directory");
}

/// Seeds `count` active NSW records named `Bulk 000`, `Bulk 001`, ...
pub async fn seed_bulk(backend: &SqliteBackend, count: usize) {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let records = (0..count)
        .map(|i| {
            NewRecord::new(format!("9{i:010}"), format!("Bulk {i:03}"))
                .with_state("NSW")
                .with_status("ACT")
                .with_created_at(base + Duration::seconds(i as i64))
        })
        .collect();

    backend.insert_batch(records).await.expect("Failed to seed records");
}

/// Extracts the `entity_name` of every row in a search envelope.
pub fn names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|r| r["entity_name"].as_str().unwrap_or_default().to_string())
        .collect()
}
