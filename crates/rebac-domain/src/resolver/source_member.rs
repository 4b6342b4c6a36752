//! Role membership resolver.

use tracing::trace;

use crate::error::DomainResult;
use crate::model::{relations, Entity, Triple};
use crate::query::Query;
use crate::store::TripleStore;

use super::traits::Resolver;

/// Grants a subject whatever its roles are granted.
///
/// For a check `subject --relation--> target` where the subject lives in
/// `subject_namespace`, every `role --member--> subject` fact with the role in
/// `role_namespace` is followed once, and the grant holds if the role has
/// either `role --relation--> target` or `role --relation--> target_ns:*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMemberResolver {
    subject_namespace: String,
    role_namespace: String,
}

impl SourceMemberResolver {
    pub fn new(subject_namespace: impl Into<String>, role_namespace: impl Into<String>) -> Self {
        Self {
            subject_namespace: subject_namespace.into(),
            role_namespace: role_namespace.into(),
        }
    }

    pub fn subject_namespace(&self) -> &str {
        &self.subject_namespace
    }

    pub fn role_namespace(&self) -> &str {
        &self.role_namespace
    }
}

impl Resolver for SourceMemberResolver {
    fn resolve(&self, store: &TripleStore, triple: &Triple) -> DomainResult<bool> {
        if triple.source.namespace != self.subject_namespace {
            return Ok(false);
        }

        let memberships = Query::select()
            .source()
            .is_namespace(self.role_namespace.as_str())
            .relation()
            .has(relations::MEMBER)
            .target()
            .is_entity(&triple.source);

        let wildcard = Entity::all(triple.target.namespace.as_str());
        for membership in store.query(&memberships) {
            let role = membership.source;
            let exact = Triple::new(role.clone(), triple.relation.as_str(), triple.target.clone());
            if store.contains(&exact) {
                trace!(%role, %triple, "granted through role");
                return Ok(true);
            }
            let global = Triple::new(role, triple.relation.as_str(), wildcard.clone());
            if store.contains(&global) {
                trace!(role = %global.source, %triple, "granted through role wildcard");
                return Ok(true);
            }
        }
        Ok(false)
    }
}
