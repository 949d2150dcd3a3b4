//! The cache facade: the single entry point client code uses. Exclusively
//! owns C2–C7 (access log, recency index, eviction set, drainer, evictor)
//! around the striped primary store (C1/C5).

use std::sync::Arc;

use crate::config::CacheConfig;
use crate::error::{Error, Result};

use super::access_log::AccessLog;
use super::drainer;
use super::eviction::EvictionSet;
use super::evictor;
use super::recency::RecencyIndex;
use super::store::Store;
use super::worker::WorkerHandle;

const MAX_KEY_BYTES: usize = 250;

/// A bounded, concurrent key/value cache with batched, lock-decoupled
/// LRU-ish eviction. See spec §4.1 for the full contract.
pub struct Cache {
    store: Arc<Store>,
    access_log: Arc<AccessLog>,
    eviction: Arc<EvictionSet>,
    shutdown_timeout: std::time::Duration,
    drainer: WorkerHandle,
    evictor: WorkerHandle,
}

impl Cache {
    /// Builds a cache and starts its background workers.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(Store::new(config.bin_count));
        let access_log = Arc::new(AccessLog::new(config.access_log_capacity));
        let recency = Arc::new(RecencyIndex::new());
        let eviction = Arc::new(EvictionSet::new());

        let drain_period = config.drain_period;
        let capacity = config.capacity;
        let drainer = {
            let access_log = Arc::clone(&access_log);
            let recency = Arc::clone(&recency);
            let eviction = Arc::clone(&eviction);
            WorkerHandle::spawn("ferrocache-drainer", move |stop| {
                drainer::run(stop, access_log, recency, eviction, capacity, drain_period);
            })
        };

        let evict_period = config.evict_period;
        let batch_size = config.batch_size;
        let evictor = {
            let eviction = Arc::clone(&eviction);
            let store = Arc::clone(&store);
            WorkerHandle::spawn("ferrocache-evictor", move |stop| {
                evictor::run(stop, eviction, store, batch_size, evict_period);
            })
        };

        Self {
            store,
            access_log,
            eviction,
            shutdown_timeout: config.shutdown_timeout,
            drainer,
            evictor,
        }
    }

    /// Returns the value for `key` if present, else `None`.
    ///
    /// Records an access only on hit — the spec's batched variant does
    /// not record misses, avoiding polluting recency with negative
    /// lookups (spec §4.1, Open Question OQ1 decided this way; see
    /// DESIGN.md).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` fails the key grammar.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        let value = self.store.get(key);
        if value.is_some() {
            self.access_log.record(key.to_string());
        }
        Ok(value)
    }

    /// Inserts or overwrites `key` with `value`. Always records an
    /// access. May transiently leave the store over `capacity`; see
    /// invariant I2 in spec §4.1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` fails the key grammar.
    pub fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        validate_key(key)?;
        self.store.put(key.to_string(), value);
        self.access_log.record(key.to_string());
        Ok(())
    }

    /// Approximate cardinality of the store; may be stale by up to one
    /// drainer cycle.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Number of keys currently pending eviction (C4); exposed for
    /// testing invariant I2 and for operational visibility.
    #[must_use]
    pub fn pending_eviction_count(&self) -> usize {
        self.eviction.len()
    }

    /// Initiates orderly shutdown: signals both workers to stop and
    /// waits up to `shutdown_timeout` each for them to finish. Does not
    /// drain anything further; a key that was moved into C4 but not yet
    /// evicted remains live in the store after this returns.
    ///
    /// Takes `&self`, not `&mut self`, so a [`Cache`] shared behind an
    /// `Arc` across connection tasks can be closed from any one of them
    /// without first proving unique ownership.
    pub fn close(&self) {
        self.drainer.stop_and_join(self.shutdown_timeout);
        self.evictor.stop_and_join(self.shutdown_timeout);
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > MAX_KEY_BYTES || key.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}
