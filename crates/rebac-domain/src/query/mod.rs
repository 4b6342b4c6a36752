//! Query builder DSL.
//!
//! A [`Query`] is a triple pattern whose empty fields mean "don't care".
//! Builders are immutable: every call consumes the query and returns a new one.
//!
//! ```
//! use rebac_domain::Query;
//!
//! let roles_of_alice = Query::select()
//!     .where_()
//!     .source().is_namespace("role")
//!     .relation().has("member")
//!     .target().is("user", "alice");
//!
//! assert_eq!(roles_of_alice.pattern().target.instance, "alice");
//! assert!(roles_of_alice.pattern().source.instance.is_empty());
//! ```

mod iter;
mod plan;

pub use crate::index::Direction;
pub use iter::QueryIter;
pub use plan::ScanPlan;

use crate::model::{Entity, Triple, ALL_INSTANCES};

/// A triple pattern with optional relation grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pattern: Triple,
    group_by_relation: bool,
}

impl Query {
    /// A query matching every triple.
    pub fn select() -> Self {
        Self::default()
    }

    /// Connective with no effect, so chains can read
    /// `select().where_().source()...`.
    pub fn where_(self) -> Self {
        self
    }

    /// Starts a condition on the source entity.
    pub fn source(self) -> EntitySelector {
        EntitySelector {
            query: self,
            side: Side::Source,
        }
    }

    /// Starts a condition on the target entity.
    pub fn target(self) -> EntitySelector {
        EntitySelector {
            query: self,
            side: Side::Target,
        }
    }

    /// Starts a condition on the relation.
    pub fn relation(self) -> RelationSelector {
        RelationSelector { query: self }
    }

    /// Yield one synthetic triple per distinct relation instead of the matches.
    ///
    /// Each synthetic triple is the query pattern with its relation filled in.
    /// Grouping always scans the whole matching range.
    pub fn group_by_relation(mut self) -> Self {
        self.group_by_relation = true;
        self
    }

    /// The pattern; empty fields are unbound.
    pub fn pattern(&self) -> &Triple {
        &self.pattern
    }

    /// Returns true if results are grouped by relation.
    pub fn is_grouped(&self) -> bool {
        self.group_by_relation
    }

    /// The same pattern without grouping.
    pub(crate) fn ungrouped(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            group_by_relation: false,
        }
    }
}

impl From<Triple> for Query {
    fn from(pattern: Triple) -> Self {
        Self {
            pattern,
            group_by_relation: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Source,
    Target,
}

/// Condition builder for the source or target entity.
#[derive(Debug, Clone)]
#[must_use = "a selector does nothing until a condition is chosen"]
pub struct EntitySelector {
    query: Query,
    side: Side,
}

impl EntitySelector {
    fn set(mut self, entity: Entity) -> Query {
        match self.side {
            Side::Source => self.query.pattern.source = entity,
            Side::Target => self.query.pattern.target = entity,
        }
        self.query
    }

    /// Matches exactly `namespace:instance`.
    pub fn is(self, namespace: impl Into<String>, instance: impl Into<String>) -> Query {
        self.set(Entity::new(namespace, instance))
    }

    /// Matches exactly `entity`.
    pub fn is_entity(self, entity: &Entity) -> Query {
        self.set(entity.clone())
    }

    /// Matches any instance of `namespace`.
    pub fn is_namespace(self, namespace: impl Into<String>) -> Query {
        self.set(Entity::new(namespace, ""))
    }

    /// Matches `instance` in any namespace.
    pub fn is_instance(self, instance: impl Into<String>) -> Query {
        self.set(Entity::new("", instance))
    }

    /// Matches stored wildcard facts (`*` instance) in any namespace.
    pub fn is_global(self) -> Query {
        self.set(Entity::new("", ALL_INSTANCES))
    }

    /// Removes any condition.
    pub fn is_any(self) -> Query {
        self.set(Entity::default())
    }
}

/// Condition builder for the relation.
#[derive(Debug, Clone)]
#[must_use = "a selector does nothing until a condition is chosen"]
pub struct RelationSelector {
    query: Query,
}

impl RelationSelector {
    /// Matches exactly `relation`.
    pub fn has(mut self, relation: impl Into<String>) -> Query {
        self.query.pattern.relation = relation.into();
        self.query
    }

    /// Removes any condition.
    pub fn is_any(mut self) -> Query {
        self.query.pattern.relation.clear();
        self.query
    }
}
