//! Eviction set (C4).
//!
//! Keys selected by the recency index (C3) as overflow wait here until
//! the evictor (C7) applies a batch. Guarded by its own lock, always
//! taken inner-most with respect to a store bin lock: the evictor holds
//! this lock only to snapshot-and-clear the pending set, then releases
//! it before taking any bin locks one key at a time (see
//! `cache::evictor`), so no lock ordering cycle is possible.

use std::collections::HashSet;

use crate::sync::Mutex;

pub(crate) struct EvictionSet {
    inner: Mutex<HashSet<String>>,
}

impl EvictionSet {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(HashSet::new()),
        }
    }

    /// Adds keys to the pending set.
    pub(crate) fn extend(&self, keys: impl IntoIterator<Item = String>) {
        self.inner.lock().extend(keys);
    }

    /// Current number of keys pending eviction.
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Snapshots and clears the pending set in one critical section.
    pub(crate) fn take_batch(&self) -> Vec<String> {
        let mut inner = self.inner.lock();
        inner.drain().collect()
    }
}
