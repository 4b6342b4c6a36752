//! BlobStore trait definition.

use crate::error::{HealthStatus, StorageError, StorageResult};

/// Options for listing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only list keys starting with this prefix. `None` lists every key.
    pub prefix: Option<String>,
}

impl ListOptions {
    /// Lists only keys starting with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns true if `key` is selected by these options.
    pub fn matches(&self, key: &str) -> bool {
        self.prefix
            .as_deref()
            .map_or(true, |prefix| key.starts_with(prefix))
    }
}

/// Iterator over listed keys. Each item may independently fail.
pub type BlobKeys<'a> = Box<dyn Iterator<Item = StorageResult<String>> + 'a>;

/// Abstract flat key/value store holding persisted facts.
///
/// Implementations must be thread-safe (Send + Sync). All operations are
/// synchronous; callers needing to bound latency do so outside the store.
pub trait BlobStore: Send + Sync + 'static {
    /// Lists keys matching the options. Iteration order is backend-defined.
    fn list(&self, options: &ListOptions) -> StorageResult<BlobKeys<'_>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Returns true if `key` is present.
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Probes the backend.
    fn health_check(&self) -> StorageResult<HealthStatus>;
}

/// Rejects keys no backend can hold.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidInput {
            message: "key cannot be empty".to_string(),
        });
    }
    Ok(())
}
