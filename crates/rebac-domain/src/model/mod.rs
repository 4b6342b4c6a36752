//! Access-control fact model.
//!
//! This module contains:
//! - Entity (namespace + instance) and Triple (source, relation, target)
//! - Well-known relation names
//! - The persisted wildcard instance

mod types;
#[cfg(test)]
mod types_proptest;

pub use types::*;
