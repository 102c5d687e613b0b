//! Error types for the business directory API.
//!
//! Every error is rendered as a JSON body of the form `{"error": "<message>"}`.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Body |
//! |-------|-------------|------|
//! | BadRequest | 400 | the validation message |
//! | QueryFailed | 500 | a fixed per-endpoint message |
//! | ServiceUnavailable | 503 | the reason |
//!
//! Store failures never leak into the body. [`RestError::query_failed`] logs
//! the underlying error and keeps only the fixed public message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bizdir_persistence::error::{SearchError, StorageError};
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Malformed request parameters (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// A store operation failed (HTTP 500).
    QueryFailed {
        /// Fixed public message for the endpoint.
        message: &'static str,
    },

    /// The store cannot serve requests (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Logs a store failure and hides it behind a fixed public message.
    ///
    /// Request-shape errors from the store are still reported as 400s.
    pub fn query_failed(message: &'static str, err: StorageError) -> Self {
        match err {
            StorageError::Search(e) => e.into(),
            other => {
                tracing::error!(error = %other, "{}", message);
                RestError::QueryFailed { message }
            }
        }
    }

    /// Shorthand for a 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::QueryFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::QueryFailed { message } => write!(f, "{}", message),
            RestError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            RestError::BadRequest { message } | RestError::ServiceUnavailable { message } => message,
            RestError::QueryFailed { message } => message.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use bizdir_persistence::error::BackendError;

    #[test]
    fn test_error_display() {
        let err = RestError::bad_request("page must be a positive integer");
        assert_eq!(err.to_string(), "Bad request: page must be a positive integer");

        let err = RestError::QueryFailed {
            message: "Failed to fetch companies",
        };
        assert_eq!(err.to_string(), "Failed to fetch companies");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::QueryFailed { message: "x" }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RestError::ServiceUnavailable {
                message: "x".into()
            }
            .status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_query_failed_hides_backend_error() {
        let err = RestError::query_failed(
            "Failed to fetch companies",
            StorageError::Backend(BackendError::Internal {
                backend_name: "sqlite".to_string(),
                message: "no such table: business_records".to_string(),
                source: None,
            }),
        );
        assert!(matches!(
            err,
            RestError::QueryFailed {
                message: "Failed to fetch companies"
            }
        ));
    }

    #[test]
    fn test_query_failed_keeps_search_errors_as_bad_request() {
        let err = RestError::query_failed(
            "Failed to fetch companies",
            StorageError::Search(SearchError::UnknownField {
                field: "nope".to_string(),
            }),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
