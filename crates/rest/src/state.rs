//! Application state for the business directory API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the record store and the server configuration.

use std::sync::Arc;

use bizdir_persistence::core::RecordStorage;
use bizdir_persistence::types::StatusCodes;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RecordStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use bizdir_rest::{AppState, ServerConfig};
/// use bizdir_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig::default();
/// let state = AppState::new(Arc::new(backend), config);
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecordStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the page size used when a request omits `limit`.
    pub fn default_page_size(&self) -> u32 {
        self.config.default_page_size
    }

    /// Returns the largest page size served.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }

    /// Returns the status codes counted by the stats endpoint.
    pub fn status_codes(&self) -> StatusCodes {
        self.config.status_codes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bizdir_persistence::error::StorageResult;
    use bizdir_persistence::types::{BusinessRecord, NewRecord};

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl RecordStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn insert(&self, _record: NewRecord) -> StorageResult<BusinessRecord> {
            unimplemented!()
        }

        async fn insert_batch(&self, _records: Vec<NewRecord>) -> StorageResult<u64> {
            unimplemented!()
        }

        async fn read(&self, _id: i64) -> StorageResult<Option<BusinessRecord>> {
            unimplemented!()
        }

        async fn count(&self) -> StorageResult<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.default_page_size(), 10);
        assert_eq!(state.status_codes().active, "ACT");
    }

    #[test]
    fn test_app_state_clone() {
        let state = AppState::new(Arc::new(MockStorage), ServerConfig::for_testing());
        let cloned = state.clone();
        assert_eq!(cloned.max_page_size(), state.max_page_size());
    }
}
