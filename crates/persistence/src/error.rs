//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates backend errors, search request errors,
//! and import errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Search request errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Record import errors
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Errors related to the shape of a search request.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The name does not refer to a record field.
    #[error("unknown record field: {field}")]
    UnknownField { field: String },

    /// The sort direction is neither `asc` nor `desc`.
    #[error("invalid sort direction: {direction}")]
    InvalidSortDirection { direction: String },

    /// Page or page size outside the accepted range.
    #[error("invalid pagination: {message}")]
    InvalidPagination { message: String },
}

/// Errors raised while loading records from an external source.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A line of the input could not be decoded as a record.
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// The input could not be read.
    #[error("failed to read import source: {message}")]
    Io { message: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
