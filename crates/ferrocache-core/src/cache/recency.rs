//! Recency index (C3).
//!
//! An insertion-ordered map of `key -> ()`: front is least-recently
//! recorded, back is most-recently recorded. `record` moves a key to the
//! back in O(1) amortized time via `IndexMap::shift_remove` + reinsert —
//! the same move-to-back trick used for LRU recency tracking in this
//! codebase's other `IndexMap`-backed cache, just without a value slot,
//! since C3 only orders keys and never answers a `get` itself.
//!
//! This index is deliberately a *separate* structure from the primary
//! store (C5/`Store`), not a view over it. It may transiently contain
//! keys already evicted from the store (a straggler from before the last
//! evictor run); callers tolerate this and reconcile lazily rather than
//! unifying the two structures, which would reintroduce the long
//! critical section that batched eviction exists to avoid (see spec §9).

use indexmap::IndexSet;

use crate::sync::RwLock;

pub(crate) struct RecencyIndex {
    inner: RwLock<IndexSet<String>>,
}

impl RecencyIndex {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(IndexSet::new()),
        }
    }

    /// Moves `key` to the most-recent end, inserting it if new.
    pub(crate) fn record(&self, key: &str) {
        let mut inner = self.inner.write();
        inner.shift_remove(key);
        inner.insert(key.to_string());
    }

    /// Removes keys from the least-recent end until `len() <= capacity`,
    /// returning the removed keys in least-recent-first order.
    pub(crate) fn trim_overflow(&self, capacity: usize) -> Vec<String> {
        let mut inner = self.inner.write();
        let mut victims = Vec::new();
        while inner.len() > capacity {
            if let Some(victim) = inner.shift_remove_index(0) {
                victims.push(victim);
            } else {
                break;
            }
        }
        victims
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> Vec<String> {
        self.inner.read().iter().cloned().collect()
    }
}
