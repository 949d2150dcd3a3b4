//! The cache engine (C1–C7): a concurrent, bounded key/value store whose
//! recency tracking is decoupled from the hot path through a lock-free
//! access log drained by a background worker, with eviction performed in
//! batches. See spec §4.1 for the full component contract.

mod access_log;
mod drainer;
mod eviction;
mod evictor;
mod facade;
mod recency;
mod store;
mod worker;

pub use facade::Cache;

#[cfg(test)]
mod concurrency_tests;
