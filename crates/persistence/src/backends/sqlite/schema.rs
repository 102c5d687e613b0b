//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Table holding the business records.
pub const RECORDS_TABLE: &str = "business_records";

fn schema_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    // Create version table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| schema_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| schema_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
///
/// Dates other than `created_at` are `YYYYMMDD` text. `created_at` is RFC 3339
/// UTC text with a fixed width, so text order is time order.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS business_records (
            id INTEGER PRIMARY KEY,
            abn TEXT NOT NULL,
            entity_name TEXT NOT NULL,
            state TEXT NOT NULL DEFAULT '',
            postcode TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT '',
            effective_from TEXT NOT NULL DEFAULT '',
            entity_type TEXT NOT NULL DEFAULT '',
            record_updated TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create business_records table: {}", e)))?;

    create_indexes(conn)
}

/// Create indexes for the filter and sort columns.
fn create_indexes(conn: &Connection) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_records_state ON business_records(state)",
        "CREATE INDEX IF NOT EXISTS idx_records_status ON business_records(status)",
        "CREATE INDEX IF NOT EXISTS idx_records_entity_type ON business_records(entity_type)",
        "CREATE INDEX IF NOT EXISTS idx_records_effective_from ON business_records(effective_from)",
        "CREATE INDEX IF NOT EXISTS idx_records_record_updated ON business_records(record_updated)",
        "CREATE INDEX IF NOT EXISTS idx_records_created ON business_records(created_at, id)",
        "CREATE INDEX IF NOT EXISTS idx_records_name ON business_records(entity_name)",
    ];

    for index_sql in &indexes {
        conn.execute(index_sql, [])
            .map_err(|e| schema_error(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}
