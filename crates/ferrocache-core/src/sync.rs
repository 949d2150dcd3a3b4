//! Synchronization primitive aliases.
//!
//! Centralizes the lock/atomic types the cache engine builds on so a future
//! change of implementation touches one file instead of every call site.

pub use parking_lot::{Mutex, RwLock};
pub use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
pub use std::sync::Arc;
pub use std::thread;
