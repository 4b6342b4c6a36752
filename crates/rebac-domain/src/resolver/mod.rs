//! Resolver chain for implicit grants.
//!
//! `TripleStore::resolve` answers from stored facts first and only then asks
//! each registered resolver, in registration order, whether the grant can be
//! derived. The first positive answer wins; the first error aborts the check
//! so that a failure is never read as "allowed".
//!
//! # Design Notes
//!
//! - Resolvers must be read-only: they receive `&TripleStore` to run
//!   `contains`/`query`/`resolve`, never `put` or `delete`.
//! - Resolution is single-level. Role-of-role chains need an additional
//!   resolver stacked on top; nothing is followed transitively.

mod source_member;
mod traits;

#[cfg(test)]
mod tests;

pub use source_member::SourceMemberResolver;
pub use traits::Resolver;
