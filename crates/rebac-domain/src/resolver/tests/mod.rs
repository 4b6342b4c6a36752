//! Tests for the resolver chain.
//!
//! Organized by functionality:
//! - Role membership resolution
//! - Chain ordering and error propagation
//! - Closure and stacked resolvers

mod mocks;
