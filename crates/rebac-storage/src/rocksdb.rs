//! RocksDB blob store.
//!
//! An embedded backend for single-node deployments that need the triple set
//! to survive restarts:
//! - High write throughput (LSM tree sequential writes)
//! - Cheap prefix listing for the startup replay
//!
//! # Key Schema
//!
//! Keys are stored verbatim as UTF-8 bytes; values are stored as given
//! (the triple store writes empty values).
//!
//! # Limitations
//!
//! - Single-node only (no replication)
//! - Compaction can cause latency spikes (configurable)

use std::path::Path;
use std::sync::Arc;

use rust_rocksdb::{IteratorMode, Options, DB};
use tracing::{debug, instrument, warn};

use crate::error::{HealthStatus, StorageError, StorageResult};
use crate::traits::{validate_key, BlobKeys, BlobStore, ListOptions};

/// Configuration for the RocksDB backend.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the RocksDB database directory.
    pub path: String,
    /// Whether to create the database if it doesn't exist.
    pub create_if_missing: bool,
    /// Write buffer size in bytes (default: 64MB).
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3).
    pub max_write_buffer_number: i32,
    /// Block cache size in bytes (default: 128MB).
    pub block_cache_size: usize,
    /// Whether to enable LZ4 compression (default: true).
    pub enable_compression: bool,
    /// Maximum number of background compaction threads (default: 4).
    pub max_background_jobs: i32,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./rebac-data".to_string(),
            create_if_missing: true,
            write_buffer_size: 64 * 1024 * 1024, // 64MB
            max_write_buffer_number: 3,
            block_cache_size: 128 * 1024 * 1024, // 128MB
            enable_compression: true,
            max_background_jobs: 4,
        }
    }
}

const HEALTH_CHECK_KEY: &[u8] = b"__health_check__";

/// RocksDB implementation of BlobStore.
pub struct RocksDbBlobStore {
    db: Arc<DB>,
    config: RocksDbConfig,
}

impl std::fmt::Debug for RocksDbBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbBlobStore")
            .field("path", &self.config.path)
            .finish()
    }
}

impl RocksDbBlobStore {
    /// Opens a RocksDB blob store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConnectionError` if the database cannot be opened.
    pub fn new(config: RocksDbConfig) -> StorageResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_max_background_jobs(config.max_background_jobs);

        if config.enable_compression {
            opts.set_compression_type(rust_rocksdb::DBCompressionType::Lz4);
        }

        let mut block_opts = rust_rocksdb::BlockBasedOptions::default();
        let cache = rust_rocksdb::Cache::new_lru_cache(config.block_cache_size);
        block_opts.set_block_cache(&cache);
        block_opts.set_bloom_filter(10.0, false);
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| StorageError::ConnectionError {
            message: format!("Failed to open RocksDB at {}: {}", config.path, e),
        })?;
        debug!(path = %config.path, "opened rocksdb blob store");

        Ok(Self {
            db: Arc::new(db),
            config,
        })
    }

    /// Opens a store at the given path with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::new(RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        })
    }

    /// Returns the configuration for this store.
    pub fn config(&self) -> &RocksDbConfig {
        &self.config
    }

    fn decode_key(raw: Box<[u8]>) -> StorageResult<String> {
        String::from_utf8(raw.into_vec()).map_err(|e| StorageError::QueryError {
            message: format!("non UTF-8 key in rocksdb: {e}"),
        })
    }
}

impl BlobStore for RocksDbBlobStore {
    #[instrument(skip(self))]
    fn list(&self, options: &ListOptions) -> StorageResult<BlobKeys<'_>> {
        let iter = match options.prefix.as_deref() {
            Some(prefix) => self.db.prefix_iterator(prefix.as_bytes()),
            None => self.db.iterator(IteratorMode::Start),
        };
        let prefix = options.prefix.clone().unwrap_or_default();

        let keys = iter
            .map(|item| {
                item.map_err(|e| StorageError::QueryError {
                    message: format!("rocksdb iteration failed: {e}"),
                })
                .and_then(|(key, _)| Self::decode_key(key))
            })
            // Without a prefix extractor the iterator runs to the end of the keyspace.
            .take_while(move |key| match key {
                Ok(key) => key.starts_with(&prefix),
                Err(_) => true,
            })
            .filter(|key| !matches!(key, Ok(k) if k.as_bytes() == HEALTH_CHECK_KEY));

        Ok(Box::new(keys))
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        self.db
            .put(key.as_bytes(), value)
            .map_err(|e| StorageError::QueryError {
                message: format!("rocksdb put failed for {key}: {e}"),
            })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.db
            .delete(key.as_bytes())
            .map_err(|e| StorageError::QueryError {
                message: format!("rocksdb delete failed for {key}: {e}"),
            })
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        self.db
            .get_pinned(key.as_bytes())
            .map(|value| value.is_some())
            .map_err(|e| StorageError::QueryError {
                message: format!("rocksdb get failed for {key}: {e}"),
            })
    }

    fn health_check(&self) -> StorageResult<HealthStatus> {
        let test_value = b"ok";

        self.db
            .put(HEALTH_CHECK_KEY, test_value)
            .map_err(|e| StorageError::HealthCheckFailed {
                message: format!("Health check write failed: {e}"),
            })?;

        match self.db.get(HEALTH_CHECK_KEY) {
            Ok(Some(value)) if value == test_value => {}
            Ok(_) => {
                return Err(StorageError::HealthCheckFailed {
                    message: "Health check read returned unexpected value".to_string(),
                });
            }
            Err(e) => {
                return Err(StorageError::HealthCheckFailed {
                    message: format!("Health check read failed: {e}"),
                });
            }
        }

        if let Err(e) = self.db.delete(HEALTH_CHECK_KEY) {
            warn!(error = %e, "failed to remove health check key");
        }

        Ok(HealthStatus {
            healthy: true,
            backend: "rocksdb",
        })
    }
}
