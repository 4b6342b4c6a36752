//! Domain error types for triple store operations.

use rebac_storage::StorageError;
use thiserror::Error;

/// Domain-specific errors for triple store operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The blob store failed during load, put, delete or replay.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A persisted key did not decode into exactly five fields.
    #[error("malformed triple key '{key}': expected 5 fields, found {fields}")]
    MalformedKey { key: String, fields: usize },

    /// A triple that cannot be stored faithfully.
    #[error("invalid triple {triple}: {reason}")]
    InvalidTriple { triple: String, reason: &'static str },

    /// A resolver failed while deriving a grant.
    #[error("resolver error: {message}")]
    ResolverError { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
