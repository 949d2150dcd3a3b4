//! Striped primary store (C1 + C5).
//!
//! Partitions the key space across `B` independent `RwLock`-guarded bins.
//! A `get` takes a read lock on the target key's bin; a `put` or `delete`
//! takes a write lock. Two keys that hash to different bins never
//! contend with each other, trading a global consistency snapshot (there
//! is no way to lock every bin at once and is none needed) for
//! cross-bin parallelism.
//!
//! Grounded on the hash-routed lock-array pattern used for vector storage
//! sharding elsewhere in this codebase's lineage: each bin is its own
//! `RwLock`, selected by `hash(key) % bin_count`, so writes to different
//! bins never block each other.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::sync::RwLock;

pub(crate) struct Store {
    bins: Vec<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Store {
    pub(crate) fn new(bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        Self {
            bins: (0..bin_count).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    fn bin_index(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.bins.len()
    }

    /// Reads the current value for `key`, if present.
    pub(crate) fn get(&self, key: &str) -> Option<Vec<u8>> {
        let bin = &self.bins[self.bin_index(key)];
        bin.read().get(key).cloned()
    }

    /// Inserts or overwrites `key`.
    pub(crate) fn put(&self, key: String, value: Vec<u8>) {
        let bin = &self.bins[self.bin_index(&key)];
        bin.write().insert(key, value);
    }

    /// Removes `key`, returning whether it was present.
    pub(crate) fn delete(&self, key: &str) -> bool {
        let bin = &self.bins[self.bin_index(key)];
        bin.write().remove(key).is_some()
    }

    /// Approximate cardinality; may be stale by the time the caller reads
    /// it since no global lock is ever held across bins.
    pub(crate) fn len(&self) -> usize {
        self.bins.iter().map(|bin| bin.read().len()).sum()
    }
}
