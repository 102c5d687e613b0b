//! Client configuration.

use std::time::Duration;

use bizdir_persistence::types::{PageRequest, RecordField, SortDirection};

/// Configuration for [`HttpSearchClient`](crate::HttpSearchClient) and
/// [`SearchSession`](crate::SearchSession).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use bizdir_client::ClientConfig;
///
/// let config = ClientConfig::new("http://directory.internal:8080")
///     .with_timeout(Duration::from_secs(5))
///     .with_page_size(25);
///
/// assert_eq!(config.initial_page().limit, 25);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the directory API, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Page size of a fresh session.
    pub page_size: u32,

    /// Sort field of a fresh session.
    pub sort_field: RecordField,

    /// Sort direction of a fresh session.
    pub sort_direction: SortDirection,

    /// Delay used by debounced text inputs.
    pub debounce_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout: Duration::from_secs(30),
            page_size: 10,
            sort_field: RecordField::EntityName,
            sort_direction: SortDirection::Asc,
            debounce_delay: Duration::from_millis(300),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn with_sort(mut self, field: RecordField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    /// The pagination a fresh session starts from: page 1, sorted.
    pub fn initial_page(&self) -> PageRequest {
        PageRequest {
            page: 1,
            limit: self.page_size.max(1),
            sort_field: Some(self.sort_field),
            sort_direction: self.sort_direction,
        }
    }
}
