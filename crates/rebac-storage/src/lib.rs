//! rebac-storage: Blob-store abstraction layer
//!
//! The triple store persists every fact as one key in a flat key/value blob
//! store. This crate provides that collaborator:
//! - BlobStore trait for list/put/delete/exists
//! - In-memory implementation for tests and ephemeral deployments
//! - RocksDB implementation (feature `rocksdb`) for durable single-node use
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rebac-storage                  │
//! ├─────────────────────────────────────────────┤
//! │  traits.rs   - BlobStore trait definition   │
//! │  memory.rs   - In-memory implementation     │
//! │  rocksdb.rs  - RocksDB implementation       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;
pub mod traits;

// Re-export commonly used types
pub use error::{HealthStatus, StorageError, StorageResult};
pub use memory::MemoryBlobStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb::{RocksDbBlobStore, RocksDbConfig};
pub use traits::{BlobKeys, BlobStore, ListOptions};
