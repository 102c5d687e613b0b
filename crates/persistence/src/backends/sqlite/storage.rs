//! RecordStorage implementation for SQLite.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::core::RecordStorage;
use crate::error::StorageResult;
use crate::types::{BusinessRecord, NewRecord};

use super::SqliteBackend;
use super::backend::{format_timestamp, internal_error, row_to_record};
use super::search::RECORD_COLUMNS;

const INSERT_SQL: &str = "INSERT INTO business_records (
        id, abn, entity_name, state, postcode, status,
        effective_from, entity_type, record_updated, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

/// Writes one record on the given connection and returns it as stored.
fn insert_on(conn: &Connection, record: NewRecord) -> StorageResult<BusinessRecord> {
    // Stored at microsecond precision; the returned record must match a read.
    let created_at = record.created_at.unwrap_or_else(Utc::now).trunc_subsecs(6);

    let mut stmt = conn
        .prepare_cached(INSERT_SQL)
        .map_err(|e| internal_error(format!("Failed to prepare insert: {}", e)))?;
    stmt.execute(params![
        record.id,
        record.abn,
        record.entity_name,
        record.state,
        record.postcode,
        record.status,
        record.effective_from,
        record.entity_type,
        record.record_updated,
        format_timestamp(&created_at),
    ])
    .map_err(|e| internal_error(format!("Failed to insert record: {}", e)))?;

    let id = record.id.unwrap_or_else(|| conn.last_insert_rowid());

    Ok(BusinessRecord {
        id,
        abn: record.abn,
        entity_name: record.entity_name,
        state: record.state,
        postcode: record.postcode,
        status: record.status,
        effective_from: record.effective_from,
        entity_type: record.entity_type,
        record_updated: record.record_updated,
        created_at,
    })
}

#[async_trait]
impl RecordStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, record: NewRecord) -> StorageResult<BusinessRecord> {
        let conn = self.get_connection()?;
        let stored = insert_on(&conn, record)?;
        tracing::debug!(id = stored.id, "Inserted record");
        Ok(stored)
    }

    async fn insert_batch(&self, records: Vec<NewRecord>) -> StorageResult<u64> {
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let mut written = 0u64;
        for record in records {
            // Dropping `tx` on error rolls the batch back
            insert_on(&tx, record)?;
            written += 1;
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        tracing::debug!(written, "Committed record batch");
        Ok(written)
    }

    async fn read(&self, id: i64) -> StorageResult<Option<BusinessRecord>> {
        let conn = self.get_connection()?;
        let sql = format!(
            "SELECT {} FROM business_records WHERE id = ?1",
            RECORD_COLUMNS
        );

        conn.query_row(&sql, params![id], row_to_record)
            .optional()
            .map_err(|e| internal_error(format!("Failed to read record: {}", e)))
    }

    async fn count(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM business_records", [], |row| {
                row.get(0)
            })
            .map_err(|e| internal_error(format!("Failed to count records: {}", e)))?;

        Ok(count as u64)
    }
}
