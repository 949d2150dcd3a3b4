//! Cache engine tuning knobs.
//!
//! All fields have defaults matching the recommended worker-tuning
//! constants; only `capacity` is mandatory.

use std::time::Duration;

/// Configuration for a [`crate::Cache`] instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum entries in steady state. Must be > 0.
    pub capacity: usize,
    /// Number of stripes (bins) the primary store is partitioned into.
    /// Defaults to the host's available parallelism.
    pub bin_count: usize,
    /// How often the drainer (C6) empties the access log into the
    /// recency index.
    pub drain_period: Duration,
    /// How often the evictor (C7) applies a pending eviction batch.
    pub evict_period: Duration,
    /// Minimum pending-eviction batch size before the evictor acts.
    pub batch_size: usize,
    /// Bound on the access log (C2); accesses beyond this are dropped.
    pub access_log_capacity: usize,
    /// How long `Cache::close` waits for each worker to stop before
    /// giving up.
    pub shutdown_timeout: Duration,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity and every other
    /// knob set to its recommended default (see spec §6).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bin_count: std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4)
                .next_power_of_two(),
            drain_period: Duration::from_millis(10),
            evict_period: Duration::from_millis(10),
            batch_size: 500,
            access_log_capacity: 1 << 17,
            shutdown_timeout: Duration::from_secs(60),
        }
    }
}
