//! Evictor worker (C7).
//!
//! Runs on a fixed period. When the pending eviction set (C4) has
//! accumulated at least `batch_size` keys, takes the whole batch under a
//! single lock acquisition, releases the lock, then deletes each key
//! from the primary store (C5) one bin-lock at a time. Batching amortizes
//! the set's own lock acquisition cost and shrinks the fraction of wall
//! time spent inside the critical section (spec §4.1 point 5).
//!
//! The eviction set's lock is never held while a bin lock is held: the
//! batch is fully drained from C4 first, so the two locks are never
//! nested (spec §4.1 point 6).
//!
//! Each tick's body runs inside `catch_unwind`, matching the drainer
//! (`cache::drainer`): spec §4.1 requires worker exceptions to be logged
//! and swallowed rather than killing the worker thread outright.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crate::sync::{AtomicBool, Ordering};

use super::eviction::EvictionSet;
use super::store::Store;
use super::worker::panic_message;

const INITIAL_WAIT: Duration = Duration::from_millis(10);

pub(crate) fn run(
    stop: Arc<AtomicBool>,
    eviction: Arc<EvictionSet>,
    store: Arc<Store>,
    batch_size: usize,
    period: Duration,
) {
    super::worker::sleep_checking_stop(&stop, INITIAL_WAIT);

    while !stop.load(Ordering::SeqCst) {
        let tick = panic::catch_unwind(AssertUnwindSafe(|| {
            if eviction.len() >= batch_size {
                let batch = eviction.take_batch();
                for key in &batch {
                    store.delete(key);
                }
            }
        }));

        if let Err(payload) = tick {
            tracing::error!(
                panic = %panic_message(&*payload),
                "evictor tick panicked, continuing"
            );
        }

        super::worker::sleep_checking_stop(&stop, period);
    }
}
