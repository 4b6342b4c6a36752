//! Triple encodings.
//!
//! - `binary`: the fixed-width 20-byte key held by the in-memory indexes
//! - `key`: the colon-joined, escaped string persisted in the blob store

pub mod binary;
pub mod key;
#[cfg(test)]
mod key_proptest;

pub use binary::{TripleKey, KEY_LEN};
pub use key::{decode_key, encode_key};
