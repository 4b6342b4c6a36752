//! Mock resolvers for chain testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{DomainError, DomainResult};
use crate::model::Triple;
use crate::resolver::Resolver;
use crate::store::TripleStore;

/// Resolver that always fails.
pub struct FailingResolver {
    pub message: &'static str,
}

impl Resolver for FailingResolver {
    fn resolve(&self, _store: &TripleStore, _triple: &Triple) -> DomainResult<bool> {
        Err(DomainError::ResolverError {
            message: self.message.to_string(),
        })
    }
}

/// Resolver that returns a fixed answer and counts how often it was asked.
#[derive(Clone)]
pub struct CountingResolver {
    answer: bool,
    calls: Arc<AtomicUsize>,
}

impl CountingResolver {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Resolver for CountingResolver {
    fn resolve(&self, _store: &TripleStore, _triple: &Triple) -> DomainResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}
