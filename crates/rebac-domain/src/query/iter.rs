//! Lazy query iteration.
//!
//! A `QueryIter` walks the chosen tree in batches. Each refill takes the
//! tree's read lock, copies out at most [`SCAN_BATCH`] keys and resumes after
//! the last visited key on the next refill, so no lock is held between calls
//! to `next()` and dropping the iterator early releases nothing but memory.

use std::collections::{HashSet, VecDeque};
use std::ops::Bound;

use crate::encoding::binary::from_binary;
use crate::encoding::TripleKey;
use crate::index::DualIndex;
use crate::intern::{Id, InternTable};
use crate::model::Triple;

use super::plan::ScanPlan;

/// Keys copied out of a tree per lock acquisition.
pub const SCAN_BATCH: usize = 256;

enum State {
    Scanning {
        plan: ScanPlan,
        cursor: Bound<TripleKey>,
        pending: VecDeque<TripleKey>,
        finished: bool,
    },
    Grouped(std::vec::IntoIter<Triple>),
    Done,
}

/// Iterator over the triples matching a query.
pub struct QueryIter<'a> {
    index: &'a DualIndex,
    interner: &'a InternTable,
    state: State,
    group_pattern: Option<Triple>,
}

impl std::fmt::Debug for QueryIter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plan = match &self.state {
            State::Scanning { plan, .. } => Some(plan),
            _ => None,
        };
        f.debug_struct("QueryIter")
            .field("plan", &plan)
            .field("grouped", &self.group_pattern.is_some())
            .finish()
    }
}

impl<'a> QueryIter<'a> {
    pub(crate) fn new(
        index: &'a DualIndex,
        interner: &'a InternTable,
        plan: ScanPlan,
        group_pattern: Option<Triple>,
    ) -> Self {
        Self {
            index,
            interner,
            state: State::Scanning {
                plan,
                cursor: plan.start(),
                pending: VecDeque::new(),
                finished: false,
            },
            group_pattern,
        }
    }

    /// An iterator that yields nothing.
    pub(crate) fn empty(index: &'a DualIndex, interner: &'a InternTable) -> Self {
        Self {
            index,
            interner,
            state: State::Done,
            group_pattern: None,
        }
    }

    /// The plan being executed, if any scan is needed.
    pub fn plan(&self) -> Option<&ScanPlan> {
        match &self.state {
            State::Scanning { plan, .. } => Some(plan),
            _ => None,
        }
    }

    /// Next matching key in forward layout.
    fn next_key(&mut self) -> Option<TripleKey> {
        let State::Scanning {
            plan,
            cursor,
            pending,
            finished,
        } = &mut self.state
        else {
            return None;
        };

        loop {
            if let Some(key) = pending.pop_front() {
                return Some(key);
            }
            if *finished {
                return None;
            }

            let oriented = plan.oriented();
            let prefix = &oriented.as_bytes()[..plan.prefix_len()];
            let batch = self.index.scan(plan.direction(), *cursor, prefix, SCAN_BATCH);
            if let Some(last) = batch.keys.last() {
                *cursor = Bound::Excluded(*last);
            }
            *finished = batch.finished;

            let direction = plan.direction();
            pending.extend(
                batch
                    .keys
                    .iter()
                    .map(|key| direction.orient(key))
                    .filter(|key| plan.accepts(key)),
            );
        }
    }

    /// Drains the scan and collects distinct relations in first-seen order.
    fn group(&mut self, pattern: Triple) -> Vec<Triple> {
        let mut seen: HashSet<Id> = HashSet::new();
        let mut relations: Vec<Id> = Vec::new();
        while let Some(key) = self.next_key() {
            let relation = key.id(2);
            if seen.insert(relation) {
                relations.push(relation);
            }
        }

        relations
            .into_iter()
            .filter_map(|id| self.interner.string(id))
            .map(|relation| Triple {
                relation: relation.to_string(),
                ..pattern.clone()
            })
            .collect()
    }
}

impl Iterator for QueryIter<'_> {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        if let Some(pattern) = self.group_pattern.take() {
            let grouped = self.group(pattern);
            self.state = State::Grouped(grouped.into_iter());
        }

        if let State::Grouped(triples) = &mut self.state {
            return triples.next();
        }

        while let Some(key) = self.next_key() {
            if let Some(triple) = from_binary(self.interner, &key) {
                return Some(triple);
            }
        }
        self.state = State::Done;
        None
    }
}
