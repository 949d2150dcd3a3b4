//! Drainer worker (C6).
//!
//! Runs on a fixed period, bulk-draining the access log (C2) into a
//! scratch buffer and replaying each drained key into the recency index
//! (C3). Draining in bulk under one channel acquisition, rather than one
//! take per key, is required by spec §4.1 point 3 — per-key draining
//! would dominate the drainer's own cost.
//!
//! After each non-empty drain, trims C3 down to capacity and hands the
//! overflow to the eviction set (C4). This is the explicit, separate
//! "trim after drain" step spec §9 calls for in place of piggybacking on
//! an insertion-ordered map's eviction callback.
//!
//! Each tick's body runs inside `catch_unwind`: spec §4.1 requires that
//! "worker exceptions are logged and swallowed; neither worker is allowed
//! to die permanently while the cache is open", so a panic here must not
//! unwind the thread itself — it is logged and the loop keeps ticking.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crate::sync::{AtomicBool, Ordering};

use super::access_log::AccessLog;
use super::eviction::EvictionSet;
use super::recency::RecencyIndex;
use super::worker::{panic_message, sleep_checking_stop};

const INITIAL_WAIT: Duration = Duration::from_millis(1);

pub(crate) fn run(
    stop: Arc<AtomicBool>,
    access_log: Arc<AccessLog>,
    recency: Arc<RecencyIndex>,
    eviction: Arc<EvictionSet>,
    capacity: usize,
    period: Duration,
) {
    sleep_checking_stop(&stop, INITIAL_WAIT);

    let mut scratch = Vec::new();
    while !stop.load(Ordering::SeqCst) {
        let tick = panic::catch_unwind(AssertUnwindSafe(|| {
            scratch.clear();
            access_log.drain_into(&mut scratch);

            if !scratch.is_empty() {
                for key in &scratch {
                    recency.record(key);
                }
                let victims = recency.trim_overflow(capacity);
                if !victims.is_empty() {
                    eviction.extend(victims);
                }
            }
        }));

        if let Err(payload) = tick {
            tracing::error!(
                panic = %panic_message(&*payload),
                "drainer tick panicked, continuing"
            );
        }

        sleep_checking_stop(&stop, period);
    }
}
