//! Core type definitions for access-control facts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Persisted wildcard instance: a fact about every instance of a namespace.
///
/// Not the same as an empty instance, which in a query means "don't care".
pub const ALL_INSTANCES: &str = "*";

/// Well-known relation names. Any other non-empty string is also a valid relation.
pub mod relations {
    pub const OWNER: &str = "owner";
    pub const WRITER: &str = "writer";
    pub const DELETER: &str = "deleter";
    pub const MEMBER: &str = "member";
    pub const VIEWER: &str = "viewer";
    pub const PARENT: &str = "parent";
}

/// An entity identifier (e.g., "user:alice" or "resource:*").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    /// The category (e.g., "user", "role").
    pub namespace: String,
    /// The identifier within the namespace.
    pub instance: String,
}

impl Entity {
    /// Creates a new Entity from namespace and instance.
    pub fn new(namespace: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            instance: instance.into(),
        }
    }

    /// The wildcard entity covering every instance of `namespace`.
    pub fn all(namespace: impl Into<String>) -> Self {
        Self::new(namespace, ALL_INSTANCES)
    }

    /// Returns true if both namespace and instance are set.
    pub fn is_bound(&self) -> bool {
        !self.namespace.is_empty() && !self.instance.is_empty()
    }

    /// Returns true if neither namespace nor instance is set.
    pub fn is_any(&self) -> bool {
        self.namespace.is_empty() && self.instance.is_empty()
    }

    /// Returns true if the instance is the persisted wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.instance == ALL_INSTANCES
    }

    /// Parses an entity from "namespace:instance" format.
    ///
    /// The split happens at the first colon, so instances may contain colons.
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let Some((namespace, instance)) = value.split_once(':') else {
            return Err("entity must be in 'namespace:instance' format");
        };
        if namespace.is_empty() || instance.is_empty() {
            return Err("entity namespace and instance cannot be empty");
        }
        Ok(Self::new(namespace, instance))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.instance)
    }
}

/// An access-control fact: `source --relation--> target`.
///
/// For example `role:admin --member--> user:alice` states that alice is a
/// member of the admin role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub source: Entity,
    pub relation: String,
    pub target: Entity,
}

impl Triple {
    /// Creates a new Triple.
    pub fn new(source: Entity, relation: impl Into<String>, target: Entity) -> Self {
        Self {
            source,
            relation: relation.into(),
            target,
        }
    }

    /// The same fact with source and target swapped.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            relation: self.relation.clone(),
            target: self.source.clone(),
        }
    }

    /// The five string fields in source-first order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.source.namespace,
            &self.source.instance,
            &self.relation,
            &self.target.namespace,
            &self.target.instance,
        ]
    }

    /// Rebuilds a triple from five fields in source-first order.
    pub fn from_fields<S: Into<String>>(fields: [S; 5]) -> Self {
        let [source_ns, source_inst, relation, target_ns, target_inst] = fields;
        Self::new(
            Entity::new(source_ns, source_inst),
            relation,
            Entity::new(target_ns, target_inst),
        )
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.source, self.relation, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new("user", "alice");
        assert_eq!(entity.namespace, "user");
        assert_eq!(entity.instance, "alice");
        assert!(entity.is_bound());
        assert!(!entity.is_wildcard());
    }

    #[test]
    fn test_wildcard_is_not_any() {
        let wildcard = Entity::all("resource");
        assert!(wildcard.is_wildcard());
        assert!(wildcard.is_bound());
        assert!(!wildcard.is_any());
        assert!(Entity::default().is_any());
    }

    #[test]
    fn test_entity_parse() {
        let entity = Entity::parse("document:readme").unwrap();
        assert_eq!(entity, Entity::new("document", "readme"));

        let nested = Entity::parse("url:https://example.com").unwrap();
        assert_eq!(nested.instance, "https://example.com");
    }

    #[test]
    fn test_entity_invalid_format() {
        assert!(Entity::parse("invalid").is_err());
        assert!(Entity::parse(":id").is_err());
        assert!(Entity::parse("type:").is_err());
    }

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(
            Entity::new("role", "admin"),
            relations::MEMBER,
            Entity::new("user", "alice"),
        );
        assert_eq!(triple.to_string(), "role:admin --member--> user:alice");
    }

    #[test]
    fn test_triple_reversed() {
        let triple = Triple::new(Entity::new("a", "1"), "r", Entity::new("b", "2"));
        let reversed = triple.reversed();
        assert_eq!(reversed.source, Entity::new("b", "2"));
        assert_eq!(reversed.target, Entity::new("a", "1"));
        assert_eq!(reversed.reversed(), triple);
    }

    #[test]
    fn test_triple_fields_roundtrip() {
        let triple = Triple::new(Entity::new("a", "1"), "r", Entity::new("b", "2"));
        assert_eq!(triple.fields(), ["a", "1", "r", "b", "2"]);
        assert_eq!(Triple::from_fields(triple.fields()), triple);
    }

    #[test]
    fn test_triple_serializes_as_nested_entities() {
        let triple =
            Triple::new(Entity::new("role", "admin"), "member", Entity::new("user", "bob"));
        let json = serde_json::to_value(&triple).unwrap();
        assert_eq!(json["source"]["namespace"], "role");
        assert_eq!(json["relation"], "member");
        assert_eq!(json["target"]["instance"], "bob");
    }
}
