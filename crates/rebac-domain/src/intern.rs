//! String interning table.
//!
//! Maps strings to dense `u32` ids and back. Id `0` is reserved for the empty
//! string, which doubles as the query "don't care" sentinel, so it is never
//! entered into the map and never assigned to a real string.
//!
//! The table only grows. Lookups take the read lock; the write lock is taken
//! only the first time a string is seen, and the map is re-checked under it
//! because another writer may have won the race.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Interned string id.
pub type Id = u32;

/// Id of the empty string.
pub const EMPTY_ID: Id = 0;

#[derive(Debug)]
struct Table {
    ids: HashMap<Arc<str>, Id>,
    // Indexed by id; slot 0 holds the empty string.
    strings: Vec<Arc<str>>,
}

/// Thread-safe bidirectional string <-> id table.
#[derive(Debug)]
pub struct InternTable {
    inner: RwLock<Table>,
}

impl Default for InternTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InternTable {
    /// Creates a table holding only the reserved empty string.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                ids: HashMap::new(),
                strings: vec![Arc::from("")],
            }),
        }
    }

    /// Returns the id of `s`, assigning the next free id if it is new.
    ///
    /// # Panics
    ///
    /// Panics when the id space is exhausted.
    pub fn intern(&self, s: &str) -> Id {
        if s.is_empty() {
            return EMPTY_ID;
        }
        if let Some(&id) = self.inner.read().ids.get(s) {
            return id;
        }

        let mut table = self.inner.write();
        if let Some(&id) = table.ids.get(s) {
            return id;
        }
        let id = Id::try_from(table.strings.len()).expect("intern table id space exhausted");
        let value: Arc<str> = Arc::from(s);
        table.strings.push(Arc::clone(&value));
        table.ids.insert(value, id);
        id
    }

    /// Returns the id of `s` without interning it.
    ///
    /// The empty string is always found as [`EMPTY_ID`].
    pub fn lookup(&self, s: &str) -> Option<Id> {
        if s.is_empty() {
            return Some(EMPTY_ID);
        }
        self.inner.read().ids.get(s).copied()
    }

    /// Reverse lookup.
    pub fn string(&self, id: Id) -> Option<Arc<str>> {
        self.inner.read().strings.get(id as usize).cloned()
    }

    /// Number of interned strings, excluding the reserved empty string.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len() - 1
    }

    /// Returns true if nothing beyond the empty string has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
