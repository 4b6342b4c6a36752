//! Resources registry.
//!
//! Namespaces can register a [`Resources`] catalog describing their instances
//! and the relations that make sense on them. The engine never consults the
//! catalog when answering queries; it exists for administrative enumeration,
//! e.g. listing what a role could be granted.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::model::Entity;

/// Descriptive metadata for a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesInfo {
    /// Namespace the catalog describes.
    pub namespace: String,
    /// Human readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One enumerable instance of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The entity this resource stands for within `namespace`.
    pub fn entity(&self, namespace: &str) -> Entity {
        Entity::new(namespace, self.id.clone())
    }
}

/// Catalog of the instances and relations of one namespace.
pub trait Resources: Send + Sync {
    /// The namespace this catalog is registered under.
    fn identity(&self) -> &str;

    /// Descriptive metadata.
    fn info(&self) -> ResourcesInfo;

    /// Every known instance.
    fn all(&self) -> DomainResult<Vec<Resource>>;

    /// Looks up one instance.
    fn find_by_id(&self, id: &str) -> DomainResult<Option<Resource>>;

    /// Relations that may target this namespace.
    fn relations(&self) -> Vec<String>;
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticResources {
    info: ResourcesInfo,
    resources: Vec<Resource>,
    relations: Vec<String>,
}

impl StaticResources {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            info: ResourcesInfo {
                namespace: namespace.into(),
                name: name.into(),
                description: String::new(),
            },
            resources: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.info.description = description.into();
        self
    }

    pub fn with_resource(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.resources.push(Resource::new(id, name));
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relations.push(relation.into());
        self
    }
}

impl Resources for StaticResources {
    fn identity(&self) -> &str {
        &self.info.namespace
    }

    fn info(&self) -> ResourcesInfo {
        self.info.clone()
    }

    fn all(&self) -> DomainResult<Vec<Resource>> {
        Ok(self.resources.clone())
    }

    fn find_by_id(&self, id: &str) -> DomainResult<Option<Resource>> {
        Ok(self.resources.iter().find(|r| r.id == id).cloned())
    }

    fn relations(&self) -> Vec<String> {
        self.relations.clone()
    }
}
