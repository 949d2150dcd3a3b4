//! Shared scaffolding for the drainer (C6) and evictor (C7) background
//! workers: both are fixed-period, dedicated-thread loops that can be
//! asked to stop and awaited up to a timeout.
//!
//! Plain `std::thread` rather than an async task: the cache engine must
//! not require an async runtime to function standalone (spec §5 treats
//! the scheduling model as "parallel threads"; the protocol layer on top
//! happens to be async, the engine underneath does not need to be).

use std::time::Duration;

use crate::sync::{thread, AtomicBool, Arc, Mutex, Ordering};

/// A handle to a running background worker thread.
///
/// `stop_and_join` takes `&self`, not `&mut self`, so [`crate::Cache`] can
/// be shared behind an `Arc` across connection tasks and still be closed
/// from any one of them; the join handle's single consumption is guarded
/// by a `Mutex` rather than relying on unique ownership.
pub(crate) struct WorkerHandle {
    stop: Arc<AtomicBool>,
    done_rx: crossbeam_channel::Receiver<()>,
    join: Mutex<Option<thread::JoinHandle<()>>>,
}

impl WorkerHandle {
    /// Spawns `body` on a dedicated thread. `body` receives a clone of
    /// the stop flag and should return as soon as it observes it set, at
    /// latest by the start of its next tick.
    pub(crate) fn spawn<F>(name: &str, body: F) -> Self
    where
        F: FnOnce(Arc<AtomicBool>) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let stop_for_thread = Arc::clone(&stop);
        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                body(stop_for_thread);
                let _ = done_tx.send(());
            })
            .expect("failed to spawn cache worker thread");

        Self {
            stop,
            done_rx,
            join: Mutex::new(Some(join)),
        }
    }

    /// Signals the worker to stop and waits up to `timeout` for it to
    /// finish. A panic inside one tick of `body`'s own loop is expected to
    /// have already been caught and logged by `body` itself (see
    /// `cache::drainer`/`cache::evictor`, which wrap each tick in
    /// `catch_unwind`) so the thread keeps running and still reaches this
    /// `done_tx.send`; `stop_and_join` only has to cope with the thread
    /// never observing the stop flag, which it does by giving up after
    /// `timeout` rather than blocking forever.
    pub(crate) fn stop_and_join(&self, timeout: Duration) {
        self.stop.store(true, Ordering::SeqCst);
        if self.done_rx.recv_timeout(timeout).is_err() {
            tracing::warn!("cache worker did not stop within shutdown timeout");
            return;
        }
        if let Some(join) = self.join.lock().take() {
            let _ = join.join();
        }
    }
}

/// Renders a `catch_unwind` payload as a human-readable message, falling
/// back to a generic label when the panic didn't pass a `&str`/`String`.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Sleeps for `duration` in short slices, returning early the moment
/// `stop` is observed set. Keeps worker shutdown responsive without
/// making the tick period itself configurable down to sub-millisecond
/// granularity.
pub(crate) fn sleep_checking_stop(stop: &AtomicBool, duration: Duration) {
    const SLICE: Duration = Duration::from_millis(1);
    let mut remaining = duration;
    while remaining > Duration::ZERO {
        if stop.load(Ordering::SeqCst) {
            return;
        }
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining -= step;
    }
}
