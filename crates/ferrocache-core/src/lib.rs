//! # ferrocache-core
//!
//! The cache engine behind ferrocache: a bounded, concurrent key/value
//! store with batched, lock-decoupled LRU-ish eviction.
//!
//! The hot path (`get`/`put`) never touches the structures that track
//! recency or decide what to evict. Instead, every access is pushed onto
//! a lock-free bounded channel; a background thread periodically drains
//! that channel into an insertion-ordered recency index, trims it down
//! to capacity, and hands overflow keys to a second background thread
//! that deletes them from the store in batches. See [`Cache`] for the
//! full contract.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferrocache_core::{Cache, CacheConfig};
//!
//! let cache = Cache::new(CacheConfig::new(10_000));
//! cache.put("key", b"value".to_vec())?;
//! assert_eq!(cache.get("key")?, Some(b"value".to_vec()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
mod sync;

pub use cache::Cache;
pub use config::CacheConfig;
pub use error::{Error, Result};
