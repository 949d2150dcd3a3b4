//! Bounded, lock-free access log (C2).
//!
//! Every `get` hit and every `put` enqueues the touched key here. The
//! queue is bounded and the enqueue is non-blocking: once full, further
//! records are silently dropped rather than applying backpressure to the
//! hot path. This is the deliberate approximate-LRU trade from spec §4.1
//! and §9 — an unbounded queue is a latent memory leak under sustained
//! writer pressure that outruns the drainer, so this bounds it and
//! accepts the resulting loss of recency precision.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

pub(crate) struct AccessLog {
    tx: Sender<String>,
    rx: Receiver<String>,
}

impl AccessLog {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx }
    }

    /// Records an access. Never blocks; drops the record if the log is
    /// at capacity.
    pub(crate) fn record(&self, key: String) {
        match self.tx.try_send(key) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                unreachable!("AccessLog owns both ends of the channel")
            }
        }
    }

    /// Drains every currently-queued record into `out`, oldest first,
    /// under a single pass over the channel (no per-key take).
    pub(crate) fn drain_into(&self, out: &mut Vec<String>) {
        while let Ok(key) = self.rx.try_recv() {
            out.push(key);
        }
    }
}
