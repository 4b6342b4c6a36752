//! Forward and backward B-tree indexes.
//!
//! Both trees hold the same set of triples. The forward tree stores the
//! source-first key, the backward tree stores its `reverse()`. Writers take
//! both write locks (forward first) so a reader of either tree never sees a
//! triple the other tree lacks once the write returns.

use std::collections::BTreeSet;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::encoding::TripleKey;

/// Which tree a scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source-first keys.
    Forward,
    /// Target-first keys.
    Backward,
}

impl Direction {
    /// Converts a forward-layout key into this tree's layout (and back).
    pub fn orient(self, key: &TripleKey) -> TripleKey {
        match self {
            Direction::Forward => *key,
            Direction::Backward => key.reverse(),
        }
    }
}

/// Outcome of one bounded scan step.
#[derive(Debug, Default)]
pub(crate) struct ScanBatch {
    /// Visited keys still inside the prefix, in the tree's own layout.
    pub(crate) keys: Vec<TripleKey>,
    /// True once the prefix range is exhausted.
    pub(crate) finished: bool,
}

#[derive(Debug, Default)]
pub(crate) struct DualIndex {
    forward: RwLock<BTreeSet<TripleKey>>,
    backward: RwLock<BTreeSet<TripleKey>>,
}

impl DualIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a forward-layout key into both trees. Returns false if present.
    pub(crate) fn insert(&self, key: TripleKey) -> bool {
        let mut forward = self.forward.write();
        let mut backward = self.backward.write();
        let inserted = forward.insert(key);
        backward.insert(key.reverse());
        inserted
    }

    /// Removes a forward-layout key from both trees. Returns false if absent.
    pub(crate) fn remove(&self, key: &TripleKey) -> bool {
        let mut forward = self.forward.write();
        let mut backward = self.backward.write();
        let removed = forward.remove(key);
        backward.remove(&key.reverse());
        removed
    }

    pub(crate) fn contains(&self, key: &TripleKey) -> bool {
        self.forward.read().contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.forward.read().len()
    }

    /// Walks up to `limit` keys of one tree starting at `from`, stopping at the
    /// first key that does not start with `prefix`.
    ///
    /// The read lock is held only for the duration of the call.
    pub(crate) fn scan(
        &self,
        direction: Direction,
        from: Bound<TripleKey>,
        prefix: &[u8],
        limit: usize,
    ) -> ScanBatch {
        let tree = match direction {
            Direction::Forward => self.forward.read(),
            Direction::Backward => self.backward.read(),
        };

        let mut batch = ScanBatch::default();
        let mut range = tree.range((from, Bound::Unbounded));
        while batch.keys.len() < limit {
            match range.next() {
                Some(key) if key.as_bytes().starts_with(prefix) => batch.keys.push(*key),
                _ => {
                    batch.finished = true;
                    break;
                }
            }
        }
        batch
    }
}
