//! Core record storage trait.
//!
//! This module defines the [`RecordStorage`] trait, the minimal set of
//! operations every record store provides. The search path only reads; writes
//! come from the import path.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{BusinessRecord, NewRecord};

/// Core storage trait for business records.
///
/// # Example
///
/// ```ignore
/// use bizdir_persistence::core::RecordStorage;
/// use bizdir_persistence::types::NewRecord;
///
/// async fn example<S: RecordStorage>(storage: &S) -> StorageResult<()> {
///     let stored = storage
///         .insert(NewRecord::new("51824753556", "ACME PTY LTD").with_state("NSW"))
///         .await?;
///
///     let read = storage.read(stored.id).await?;
///     assert_eq!(read, Some(stored));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a single record and returns it as stored.
    ///
    /// The store assigns `id` when absent and stamps `created_at` with the
    /// current time when absent.
    async fn insert(&self, record: NewRecord) -> StorageResult<BusinessRecord>;

    /// Inserts many records atomically.
    ///
    /// Either every record is written or none is. Returns the number written.
    async fn insert_batch(&self, records: Vec<NewRecord>) -> StorageResult<u64>;

    /// Reads a record by id.
    async fn read(&self, id: i64) -> StorageResult<Option<BusinessRecord>>;

    /// Counts every record in the store.
    async fn count(&self) -> StorageResult<u64>;

    /// Checks that the store can serve queries.
    async fn health_check(&self) -> StorageResult<()> {
        self.count().await.map(|_| ())
    }
}
