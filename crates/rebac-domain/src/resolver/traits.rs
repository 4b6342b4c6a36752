//! Resolver trait.

use crate::error::DomainResult;
use crate::model::Triple;
use crate::store::TripleStore;

/// Derives grants that are not stored literally.
///
/// Any `Fn(&TripleStore, &Triple) -> DomainResult<bool>` closure is a resolver.
pub trait Resolver: Send + Sync {
    /// Returns true if `triple` holds by derivation.
    fn resolve(&self, store: &TripleStore, triple: &Triple) -> DomainResult<bool>;
}

impl<F> Resolver for F
where
    F: Fn(&TripleStore, &Triple) -> DomainResult<bool> + Send + Sync,
{
    fn resolve(&self, store: &TripleStore, triple: &Triple) -> DomainResult<bool> {
        self(store, triple)
    }
}
