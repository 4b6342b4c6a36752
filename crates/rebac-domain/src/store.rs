//! The triple store.
//!
//! `TripleStore` owns the interning table, both indexes and the
//! resolver/resources registry, and writes through to a [`BlobStore`].
//!
//! # Write path
//!
//! `put` interns the triple, returns early if the forward tree already holds
//! it, persists the key and then inserts into both trees. Two concurrent puts
//! of the same triple may both persist; the blob store and the trees converge
//! to a single copy either way.
//!
//! # Read path
//!
//! `contains`, `query` and `delete` encode without interning. A triple naming
//! a string the store has never seen cannot be stored, so these calls answer
//! "absent" without growing the table.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rebac_storage::{BlobStore, HealthStatus, ListOptions};
use tracing::{debug, info, instrument, warn};

use crate::encoding::binary::{into_binary, try_into_binary};
use crate::encoding::key::unstorable_reason;
use crate::encoding::{decode_key, encode_key};
use crate::error::{DomainError, DomainResult};
use crate::index::{DualIndex, Direction};
use crate::intern::InternTable;
use crate::model::Triple;
use crate::query::{Query, QueryIter, ScanPlan};
use crate::resolver::Resolver;
use crate::resources::Resources;

#[derive(Default)]
struct Registry {
    resolvers: Vec<Arc<dyn Resolver>>,
    resources: BTreeMap<String, Arc<dyn Resources>>,
}

/// Relation triple store with forward/backward indexes and a resolver chain.
pub struct TripleStore {
    blobs: Arc<dyn BlobStore>,
    interner: InternTable,
    index: DualIndex,
    registry: RwLock<Registry>,
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("TripleStore")
            .field("triples", &self.index.len())
            .field("interned", &self.interner.len())
            .field("resolvers", &registry.resolvers.len())
            .field("resources", &registry.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TripleStore {
    /// Opens a store over `blobs`, replaying every persisted triple.
    ///
    /// The store is not returned until the replay has rebuilt both indexes.
    ///
    /// # Errors
    ///
    /// Fails if the blob store cannot be listed or holds a malformed key.
    pub fn open(blobs: Arc<dyn BlobStore>) -> DomainResult<Self> {
        let store = Self {
            blobs,
            interner: InternTable::new(),
            index: DualIndex::new(),
            registry: RwLock::new(Registry::default()),
        };
        store.replay()?;
        Ok(store)
    }

    #[instrument(skip(self))]
    fn replay(&self) -> DomainResult<usize> {
        let started = Instant::now();
        let mut replayed = 0usize;

        for key in self.blobs.list(&ListOptions::default())? {
            let triple = decode_key(&key?)?;
            self.index.insert(into_binary(&self.interner, &triple));
            replayed += 1;
        }

        info!(
            triples = replayed,
            interned = self.interner.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "replayed persisted triples"
        );
        Ok(replayed)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Stores `triple`. Returns false if it was already present.
    ///
    /// # Errors
    ///
    /// `InvalidTriple` for empty fields or fields starting with `:`;
    /// `Storage` if persisting fails, in which case the indexes are untouched.
    pub fn put(&self, triple: &Triple) -> DomainResult<bool> {
        if let Some(reason) = unstorable_reason(triple) {
            return Err(DomainError::InvalidTriple {
                triple: triple.to_string(),
                reason,
            });
        }

        let key = into_binary(&self.interner, triple);
        if self.index.contains(&key) {
            return Ok(false);
        }

        self.blobs.put(&encode_key(triple), &[])?;
        let inserted = self.index.insert(key);
        debug!(%triple, "stored triple");
        Ok(inserted)
    }

    /// Stores every triple in order, stopping at the first error.
    ///
    /// Returns how many were not already present.
    pub fn put_all<I>(&self, triples: I) -> DomainResult<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<Triple>,
    {
        let mut inserted = 0;
        for triple in triples {
            if self.put(triple.borrow())? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Removes `triple`. Returns false if it was not stored.
    pub fn delete(&self, triple: &Triple) -> DomainResult<bool> {
        let Some(key) = try_into_binary(&self.interner, triple) else {
            return Ok(false);
        };
        // Absent triples must not reach the blob store.
        if !self.index.contains(&key) {
            return Ok(false);
        }

        self.blobs.delete(&encode_key(triple))?;
        let removed = self.index.remove(&key);
        debug!(%triple, "deleted triple");
        Ok(removed)
    }

    /// Removes every triple matching `query`. Grouping is ignored.
    ///
    /// Matches are collected before the first delete.
    #[instrument(skip(self, query), fields(pattern = %query.pattern()))]
    pub fn delete_by_query(&self, query: &Query) -> DomainResult<usize> {
        let matches: Vec<Triple> = self.query(&query.ungrouped()).collect();

        let mut deleted = 0;
        for triple in &matches {
            if self.delete(triple)? {
                deleted += 1;
            }
        }
        info!(matched = matches.len(), deleted, "deleted by query");
        Ok(deleted)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns true if exactly `triple` is stored. Resolvers are not consulted.
    pub fn contains(&self, triple: &Triple) -> bool {
        try_into_binary(&self.interner, triple).is_some_and(|key| self.index.contains(&key))
    }

    /// Lazily iterates the triples matching `query`.
    pub fn query(&self, query: &Query) -> QueryIter<'_> {
        match self.plan(query) {
            Some(plan) => {
                let group = query.is_grouped().then(|| query.pattern().clone());
                QueryIter::new(&self.index, &self.interner, plan, group)
            }
            None => QueryIter::empty(&self.index, &self.interner),
        }
    }

    /// The scan `query` would run, or `None` if it names an unknown string.
    pub fn plan(&self, query: &Query) -> Option<ScanPlan> {
        try_into_binary(&self.interner, query.pattern()).map(ScanPlan::for_pattern)
    }

    /// Every triple in forward key order.
    pub fn all(&self) -> QueryIter<'_> {
        let plan = ScanPlan::with_direction(Default::default(), Direction::Forward);
        QueryIter::new(&self.index, &self.interner, plan, None)
    }

    /// Number of stored triples.
    pub fn count(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct strings interned so far.
    pub fn interned_strings(&self) -> usize {
        self.interner.len()
    }

    /// Probes the underlying blob store.
    pub fn health_check(&self) -> DomainResult<HealthStatus> {
        Ok(self.blobs.health_check()?)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Returns true if `triple` is stored or any resolver derives it.
    ///
    /// Resolvers run in registration order; the first `true` wins and the
    /// first error is returned immediately. Triples with an empty field or a
    /// field starting with `:` are never granted.
    pub fn resolve(&self, triple: &Triple) -> DomainResult<bool> {
        // An unstorable triple is never a fact, and empty fields would act as
        // wildcards inside resolver queries.
        if unstorable_reason(triple).is_some() {
            debug!(%triple, "refusing to resolve unstorable triple");
            return Ok(false);
        }
        if self.contains(triple) {
            return Ok(true);
        }

        // Snapshot so resolvers can call back into `resolve`.
        let resolvers = self.registry.read().resolvers.clone();
        for (position, resolver) in resolvers.iter().enumerate() {
            match resolver.resolve(self, triple) {
                Ok(true) => {
                    debug!(%triple, resolver = position, "resolved");
                    return Ok(true);
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(%triple, resolver = position, error = %e, "resolver failed");
                    return Err(e);
                }
            }
        }
        Ok(false)
    }

    /// Appends a resolver to the chain.
    pub fn add_resolver<R>(&self, resolver: R)
    where
        R: Resolver + 'static,
    {
        self.registry.write().resolvers.push(Arc::new(resolver));
    }

    /// Number of registered resolvers.
    pub fn resolver_count(&self) -> usize {
        self.registry.read().resolvers.len()
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Registers a catalog under its identity, returning any catalog it replaces.
    pub fn register_resources(&self, resources: Arc<dyn Resources>) -> Option<Arc<dyn Resources>> {
        let namespace = resources.identity().to_string();
        self.registry.write().resources.insert(namespace, resources)
    }

    /// The catalog registered for `namespace`.
    pub fn resources(&self, namespace: &str) -> Option<Arc<dyn Resources>> {
        self.registry.read().resources.get(namespace).cloned()
    }

    /// Every registered catalog, ordered by namespace.
    pub fn all_resources(&self) -> Vec<Arc<dyn Resources>> {
        self.registry.read().resources.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{relations, Entity};
    use crate::resources::StaticResources;
    use rebac_storage::MemoryBlobStore;

    fn store() -> TripleStore {
        TripleStore::open(MemoryBlobStore::new_shared()).unwrap()
    }

    fn grant(role: &str, relation: &str, ns: &str, inst: &str) -> Triple {
        Triple::new(Entity::new("role", role), relation, Entity::new(ns, inst))
    }

    #[test]
    fn test_put_is_idempotent() {
        let store = store();
        let triple = grant("admin", relations::OWNER, "document", "readme");

        assert!(store.put(&triple).unwrap());
        assert!(!store.put(&triple).unwrap());
        assert_eq!(store.count(), 1);
        assert!(store.contains(&triple));
    }

    #[test]
    fn test_put_rejects_unstorable_fields() {
        let store = store();
        let empty = grant("admin", "", "document", "readme");
        let colon = grant(":admin", relations::OWNER, "document", "readme");

        assert!(matches!(store.put(&empty), Err(DomainError::InvalidTriple { .. })));
        assert!(matches!(store.put(&colon), Err(DomainError::InvalidTriple { .. })));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_put_persists_encoded_key() {
        let blobs = MemoryBlobStore::new_shared();
        let store = TripleStore::open(blobs.clone()).unwrap();
        store.put(&grant("admin", relations::OWNER, "document", "a:b")).unwrap();

        assert!(blobs.exists("role:admin:owner:document:a::b").unwrap());
    }

    #[test]
    fn test_delete_absent_does_not_touch_blobs() {
        let store = store();
        let triple = grant("admin", relations::OWNER, "document", "readme");
        assert!(!store.delete(&triple).unwrap());

        store.put(&triple).unwrap();
        assert!(store.delete(&triple).unwrap());
        assert!(!store.delete(&triple).unwrap());
        assert!(!store.contains(&triple));
    }

    #[test]
    fn test_reads_do_not_intern() {
        let store = store();
        store.put(&grant("admin", relations::OWNER, "document", "readme")).unwrap();
        let before = store.interned_strings();

        let unknown = grant("intruder", "steal", "vault", "gold");
        assert!(!store.contains(&unknown));
        assert!(!store.delete(&unknown).unwrap());
        assert_eq!(store.query(&Query::from(unknown.clone())).count(), 0);
        assert!(store.plan(&Query::from(unknown)).is_none());
        assert_eq!(store.interned_strings(), before);
    }

    #[test]
    fn test_put_all_counts_new_triples() {
        let store = store();
        let triples = vec![
            grant("admin", relations::OWNER, "document", "a"),
            grant("admin", relations::OWNER, "document", "b"),
            grant("admin", relations::OWNER, "document", "a"),
        ];
        assert_eq!(store.put_all(&triples).unwrap(), 2);
        assert_eq!(store.all().count(), 2);
    }

    #[test]
    fn test_delete_by_query_ignores_grouping() {
        let store = store();
        store
            .put_all([
                grant("admin", relations::OWNER, "document", "a"),
                grant("admin", relations::VIEWER, "document", "a"),
                grant("guest", relations::VIEWER, "document", "a"),
            ])
            .unwrap();

        let query = Query::select().source().is("role", "admin").group_by_relation();
        assert_eq!(store.delete_by_query(&query).unwrap(), 2);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_resolve_without_resolvers_is_contains() {
        let store = store();
        let triple = grant("admin", relations::OWNER, "document", "a");
        assert!(!store.resolve(&triple).unwrap());
        store.put(&triple).unwrap();
        assert!(store.resolve(&triple).unwrap());
        assert_eq!(store.resolver_count(), 0);
    }

    #[test]
    fn test_resources_registry() {
        let store = store();
        let documents = Arc::new(StaticResources::new("document", "Documents"));
        assert!(store.register_resources(documents).is_none());
        assert!(store
            .register_resources(Arc::new(StaticResources::new("folder", "Folders")))
            .is_none());

        let replaced = store.register_resources(Arc::new(StaticResources::new("document", "Docs")));
        assert_eq!(replaced.unwrap().info().name, "Documents");

        assert_eq!(store.resources("document").unwrap().info().name, "Docs");
        assert!(store.resources("user").is_none());
        let namespaces: Vec<_> = store
            .all_resources()
            .iter()
            .map(|r| r.identity().to_string())
            .collect();
        assert_eq!(namespaces, vec!["document", "folder"]);
    }

    #[test]
    fn test_health_check_reports_backend() {
        let status = store().health_check().unwrap();
        assert!(status.healthy);
    }
}
