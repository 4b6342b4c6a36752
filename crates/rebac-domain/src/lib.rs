//! rebac-domain: Relation-based access control engine
//!
//! This crate contains the triple store and permission resolution:
//! - Entity / relation / triple model
//! - String interning and the 20-byte binary triple codec
//! - Forward and backward B-tree indexes with a prefix-scan optimizer
//! - Query builder DSL
//! - Resolver chain for implicit grants (role membership)
//! - Resources registry for administrative enumeration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                rebac-domain                  │
//! ├─────────────────────────────────────────────┤
//! │  model/     - Entity, Triple, relations     │
//! │  intern.rs  - String interning table        │
//! │  encoding/  - Binary keys & blob-store keys │
//! │  index.rs   - Forward/backward trees        │
//! │  query/     - DSL, optimizer, lazy scans    │
//! │  store.rs   - TripleStore                   │
//! │  resolver/  - Resolver chain                │
//! │  resources.rs - Namespace catalog           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use rebac_domain::model::{relations, Entity, Triple};
//! use rebac_domain::resolver::SourceMemberResolver;
//! use rebac_domain::TripleStore;
//! use rebac_storage::MemoryBlobStore;
//!
//! let store = TripleStore::open(MemoryBlobStore::new_shared()).unwrap();
//! store.add_resolver(SourceMemberResolver::new("user", "role"));
//!
//! store
//!     .put(&Triple::new(
//!         Entity::new("role", "admin"),
//!         relations::MEMBER,
//!         Entity::new("user", "alice"),
//!     ))
//!     .unwrap();
//! let admin = Entity::new("role", "admin");
//! let resource = Entity::new("resource", "test");
//! store.put(&Triple::new(admin, "create_user", resource.clone())).unwrap();
//!
//! let check = Triple::new(Entity::new("user", "alice"), "create_user", resource);
//! assert!(!store.contains(&check));
//! assert!(store.resolve(&check).unwrap());
//! ```

pub mod encoding;
pub mod error;
mod index;
pub mod intern;
#[cfg(test)]
mod intern_proptest;
pub mod model;
pub mod query;
pub mod resolver;
pub mod resources;
pub mod store;

// Re-export commonly used types at the crate root
pub use error::{DomainError, DomainResult};
pub use model::{Entity, Triple};
pub use query::{Query, QueryIter};
pub use resolver::Resolver;
pub use resources::Resources;
pub use store::TripleStore;
