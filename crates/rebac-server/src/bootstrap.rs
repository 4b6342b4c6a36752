//! Opens a `TripleStore` from configuration.

use std::sync::Arc;

use rebac_domain::resolver::SourceMemberResolver;
use rebac_domain::{DomainError, TripleStore};
use rebac_storage::{BlobStore, MemoryBlobStore, StorageError};
use tracing::info;

use crate::config::{ServerConfig, StorageSettings};

/// Error type for store bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("storage backend '{backend}' is not available in this build")]
    BackendUnavailable { backend: String },

    #[error("failed to open blob store: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to replay triple store: {0}")]
    Replay(#[from] DomainError),
}

/// Builds the configured blob store, replays it and installs the configured
/// resolvers in order.
pub fn open_store(config: &ServerConfig) -> Result<TripleStore, BootstrapError> {
    let blobs = open_blobs(&config.storage)?;
    let store = TripleStore::open(blobs)?;

    for resolver in &config.resolvers {
        store.add_resolver(SourceMemberResolver::new(
            resolver.subject_namespace.as_str(),
            resolver.role_namespace.as_str(),
        ));
    }

    info!(
        backend = %config.storage.backend,
        triples = store.count(),
        resolvers = store.resolver_count(),
        "triple store ready"
    );
    Ok(store)
}

fn open_blobs(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BootstrapError> {
    match settings.backend.as_str() {
        "memory" => Ok(MemoryBlobStore::new_shared()),
        #[cfg(feature = "rocksdb")]
        "rocksdb" => {
            let path = settings.data_path.as_deref().unwrap_or("./rebac-data");
            Ok(Arc::new(rebac_storage::RocksDbBlobStore::open(path)?))
        }
        other => Err(BootstrapError::BackendUnavailable {
            backend: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverSettings;
    use rebac_domain::model::{Entity, Triple};

    #[test]
    fn test_open_memory_store_installs_resolvers() {
        let mut config = ServerConfig::default();
        config
            .resolvers
            .push(ResolverSettings::new("service", "team"));

        let store = open_store(&config).unwrap();
        assert_eq!(store.count(), 0);
        assert_eq!(store.resolver_count(), 2);

        store
            .put_all([
                Triple::new(Entity::new("team", "ops"), "member", Entity::new("service", "ci")),
                Triple::new(Entity::new("team", "ops"), "deploy", Entity::new("cluster", "prod")),
            ])
            .unwrap();
        let check =
            Triple::new(Entity::new("service", "ci"), "deploy", Entity::new("cluster", "prod"));
        assert!(store.resolve(&check).unwrap());
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_rocksdb_requires_feature() {
        let mut config = ServerConfig::default();
        config.storage.backend = "rocksdb".to_string();
        config.storage.data_path = Some("/tmp/unused".to_string());

        let err = open_store(&config).unwrap_err();
        assert!(matches!(err, BootstrapError::BackendUnavailable { .. }));
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn test_rocksdb_store_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = ServerConfig::default();
        config.storage.backend = "rocksdb".to_string();
        config.storage.data_path = Some(dir.path().to_string_lossy().to_string());

        let triple =
            Triple::new(Entity::new("role", "admin"), "owner", Entity::new("document", "a:b"));
        {
            let store = open_store(&config).unwrap();
            store.put(&triple).unwrap();
        }

        let store = open_store(&config).unwrap();
        assert!(store.contains(&triple));
        assert_eq!(store.count(), 1);
    }
}
