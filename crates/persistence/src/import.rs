//! Newline-delimited JSON record import.
//!
//! Each non-blank line holds one [`NewRecord`] object. The whole input is
//! decoded before anything is written, then loaded with a single
//! [`RecordStorage::insert_batch`] call, so a malformed line leaves the store
//! untouched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::core::RecordStorage;
use crate::error::{ImportError, StorageResult};
use crate::types::NewRecord;

/// Decodes NDJSON records from a reader.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<NewRecord>, ImportError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| ImportError::Io {
            message: format!("line {}: {}", line_no, e),
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let record: NewRecord =
            serde_json::from_str(&line).map_err(|e| ImportError::MalformedRecord {
                line: line_no,
                message: e.to_string(),
            })?;
        records.push(record);
    }

    Ok(records)
}

/// Decodes records from a reader and writes them in one batch.
///
/// Returns the number of records written.
pub async fn import_records<S, R>(storage: &S, reader: R) -> StorageResult<u64>
where
    S: RecordStorage + ?Sized,
    R: BufRead,
{
    let records = parse_records(reader)?;
    debug!(records = records.len(), "Decoded import batch");

    let written = storage.insert_batch(records).await?;
    info!(written, backend = storage.backend_name(), "Imported records");
    Ok(written)
}

/// Opens an NDJSON file and imports its records.
pub async fn import_file<S>(storage: &S, path: impl AsRef<Path>) -> StorageResult<u64>
where
    S: RecordStorage + ?Sized,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ImportError::Io {
        message: format!("{}: {}", path.display(), e),
    })?;
    import_records(storage, BufReader::new(file)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_records() {
        let input = r#"{"abn":"1","entity_name":"ACME","state":"NSW","status":"ACT"}

{"id":42,"abn":"2","entity_name":"Zenith","created_at":"2024-01-01T00:00:00Z"}
"#;
        let records = parse_records(Cursor::new(input)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "NSW");
        assert_eq!(records[1].id, Some(42));
        assert!(records[1].created_at.is_some());
    }

    #[test]
    fn test_parse_reports_line_number() {
        let input = "{\"abn\":\"1\",\"entity_name\":\"A\"}\n\n{not json}\n";
        let err = parse_records(Cursor::new(input)).unwrap_err();

        match err {
            ImportError::MalformedRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let records = parse_records(Cursor::new("\n  \n")).unwrap();
        assert!(records.is_empty());
    }
}
