//! Storage error types.

use thiserror::Error;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be opened or reached.
    #[error("storage connection error: {message}")]
    ConnectionError { message: String },

    /// A read or write against the backend failed.
    #[error("storage query error: {message}")]
    QueryError { message: String },

    /// Invalid input error.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Health check failed.
    #[error("health check failed: {message}")]
    HealthCheckFailed { message: String },

    /// Internal error.
    #[error("internal storage error: {message}")]
    InternalError { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result of a backend health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the backend answered the health check.
    pub healthy: bool,
    /// Backend name, e.g. "memory" or "rocksdb".
    pub backend: &'static str,
}
