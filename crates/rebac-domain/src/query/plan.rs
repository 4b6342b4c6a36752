//! Index selection and prefix computation.
//!
//! The optimizer picks the tree whose key order puts the most specific bound
//! fields first:
//!
//! | bound fields                         | tree     |
//! |--------------------------------------|----------|
//! | source namespace and instance        | forward  |
//! | target namespace and instance        | backward |
//! | target namespace only                | forward  |
//! | anything else                        | backward |
//!
//! The scan prefix is the run of bound fields at the front of the chosen
//! tree's key. Fields bound after a gap are checked per entry instead.

use std::ops::Bound;

use crate::encoding::binary::FIELD_COUNT;
use crate::encoding::TripleKey;
use crate::index::Direction;
use crate::intern::EMPTY_ID;

/// How a query pattern is executed against the indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    direction: Direction,
    /// Pattern in forward layout; zero fields are unbound.
    pattern: TripleKey,
    prefix_len: usize,
}

impl ScanPlan {
    /// Plans a scan for a forward-layout pattern.
    pub fn for_pattern(pattern: TripleKey) -> Self {
        Self::with_direction(pattern, choose_direction(&pattern))
    }

    /// Plans a scan on a fixed tree.
    pub fn with_direction(pattern: TripleKey, direction: Direction) -> Self {
        let prefix_len = direction.orient(&pattern).bound_prefix_len();
        Self {
            direction,
            pattern,
            prefix_len,
        }
    }

    /// The tree to walk.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The pattern in forward layout.
    pub fn pattern(&self) -> &TripleKey {
        &self.pattern
    }

    /// Number of leading key bytes shared by every candidate.
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// The pattern in the chosen tree's layout.
    pub(crate) fn oriented(&self) -> TripleKey {
        self.direction.orient(&self.pattern)
    }

    /// Where the scan starts.
    pub(crate) fn start(&self) -> Bound<TripleKey> {
        if self.prefix_len == 0 {
            Bound::Unbounded
        } else {
            Bound::Included(self.oriented().pivot(self.prefix_len))
        }
    }

    /// Returns true if a forward-layout entry satisfies every bound field.
    pub(crate) fn accepts(&self, entry: &TripleKey) -> bool {
        entry.matches(&self.pattern)
    }
}

fn choose_direction(pattern: &TripleKey) -> Direction {
    let bound = |field: usize| pattern.id(field) != EMPTY_ID;
    let [source_ns, source_inst, _, target_ns, target_inst]: [bool; FIELD_COUNT] =
        std::array::from_fn(bound);

    if source_ns && source_inst {
        Direction::Forward
    } else if target_ns && target_inst {
        Direction::Backward
    } else if target_ns {
        Direction::Forward
    } else {
        Direction::Backward
    }
}
