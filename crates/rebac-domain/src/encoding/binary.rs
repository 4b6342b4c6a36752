//! Fixed-width binary triple keys.
//!
//! A key is five consecutive little-endian `u32` interned ids:
//!
//! ```text
//! [source ns][source inst][relation][target ns][target inst]
//!  0..4       4..8         8..12     12..16     16..20
//! ```
//!
//! Keys are compared bytewise. That order is only used to group keys sharing
//! a prefix; it is not the numeric order of the ids.

use crate::intern::{Id, InternTable, EMPTY_ID};
use crate::model::Triple;

/// Number of logical fields in a triple.
pub const FIELD_COUNT: usize = 5;

/// Bytes per encoded field.
pub const FIELD_WIDTH: usize = 4;

/// Bytes per encoded triple.
pub const KEY_LEN: usize = FIELD_COUNT * FIELD_WIDTH;

/// A triple encoded as interned ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TripleKey([u8; KEY_LEN]);

impl TripleKey {
    /// Encodes five ids in the given order.
    pub fn from_ids(ids: [Id; FIELD_COUNT]) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        for (chunk, id) in bytes.chunks_exact_mut(FIELD_WIDTH).zip(ids) {
            chunk.copy_from_slice(&id.to_le_bytes());
        }
        Self(bytes)
    }

    /// Decodes the five ids.
    pub fn ids(&self) -> [Id; FIELD_COUNT] {
        std::array::from_fn(|field| self.id(field))
    }

    /// The id stored at `field` (0..5).
    pub fn id(&self, field: usize) -> Id {
        let start = field * FIELD_WIDTH;
        let mut raw = [0u8; FIELD_WIDTH];
        raw.copy_from_slice(&self.0[start..start + FIELD_WIDTH]);
        Id::from_le_bytes(raw)
    }

    /// Swaps source and target, keeping the relation in the middle.
    ///
    /// Applied to a forward key this yields the backward-tree key and vice versa.
    pub fn reverse(&self) -> Self {
        let [source_ns, source_inst, relation, target_ns, target_inst] = self.ids();
        Self::from_ids([target_ns, target_inst, relation, source_ns, source_inst])
    }

    /// Length in bytes of the leading run of bound (non-zero) fields.
    pub fn bound_prefix_len(&self) -> usize {
        (0..FIELD_COUNT)
            .position(|field| self.id(field) == EMPTY_ID)
            .unwrap_or(FIELD_COUNT)
            * FIELD_WIDTH
    }

    /// The smallest key starting with the first `len` bytes of this one.
    pub fn pivot(&self, len: usize) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        bytes[..len].copy_from_slice(&self.0[..len]);
        Self(bytes)
    }

    /// Returns true if every non-zero field of `pattern` equals the same field here.
    pub fn matches(&self, pattern: &TripleKey) -> bool {
        (0..FIELD_COUNT).all(|field| {
            let expected = pattern.id(field);
            expected == EMPTY_ID || expected == self.id(field)
        })
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Encodes `triple`, interning every field.
pub fn into_binary(table: &InternTable, triple: &Triple) -> TripleKey {
    TripleKey::from_ids(triple.fields().map(|field| table.intern(field)))
}

/// Encodes `triple` without touching the table.
///
/// Returns `None` if any field was never interned: no stored triple can
/// match it, and read paths must not grow the table on behalf of callers.
pub fn try_into_binary(table: &InternTable, triple: &Triple) -> Option<TripleKey> {
    let [a, b, c, d, e] = triple.fields();
    Some(TripleKey::from_ids([
        table.lookup(a)?,
        table.lookup(b)?,
        table.lookup(c)?,
        table.lookup(d)?,
        table.lookup(e)?,
    ]))
}

/// Decodes a forward-layout key back into strings.
pub fn from_binary(table: &InternTable, key: &TripleKey) -> Option<Triple> {
    let [a, b, c, d, e] = key.ids();
    Some(Triple::from_fields([
        table.string(a)?.to_string(),
        table.string(b)?.to_string(),
        table.string(c)?.to_string(),
        table.string(d)?.to_string(),
        table.string(e)?.to_string(),
    ]))
}
