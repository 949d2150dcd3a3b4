//! Concurrency and invariant tests for the cache engine (spec §8).
//!
//! Modeled on this codebase's deadlock-detection test style: spawn
//! several threads hammering the same `Cache`, join with a timeout, and
//! fail loudly if the join never completes rather than hanging CI.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::Cache;

const DEADLOCK_TIMEOUT: Duration = Duration::from_secs(10);

fn cache_for_tests(capacity: usize, batch_size: usize) -> Cache {
    let mut config = CacheConfig::new(capacity);
    config.bin_count = 8;
    config.drain_period = Duration::from_millis(2);
    config.evict_period = Duration::from_millis(2);
    config.batch_size = batch_size;
    Cache::new(config)
}

fn join_with_deadlock_guard(handle: thread::JoinHandle<()>, label: &str) {
    let start = Instant::now();
    loop {
        if handle.is_finished() {
            handle.join().expect("worker thread panicked");
            return;
        }
        if start.elapsed() > DEADLOCK_TIMEOUT {
            panic!("DEADLOCK DETECTED: {label} did not complete within timeout");
        }
        thread::sleep(Duration::from_millis(10));
    }
}

/// P1: a reader that issues `get` shortly after its own `put`, with no
/// intervening eviction pressure, must see its own write.
#[test]
fn p1_read_after_write_from_the_same_thread_is_visible() {
    let cache = cache_for_tests(1000, 500);

    for i in 0..200 {
        let key = format!("key{i}");
        cache.put(&key, vec![i as u8]).unwrap();
        // One drainer period of slack, per spec P1's wording.
        thread::sleep(Duration::from_millis(3));
        assert_eq!(cache.get(&key).unwrap(), Some(vec![i as u8]));
    }
}

/// P4: an identical `set` repeated immediately produces the same
/// observable state as a single `set`.
#[test]
fn p4_repeated_identical_put_is_idempotent() {
    let cache = cache_for_tests(100, 500);
    cache.put("k", b"same".to_vec()).unwrap();
    cache.put("k", b"same".to_vec()).unwrap();
    cache.put("k", b"same".to_vec()).unwrap();

    assert_eq!(cache.get("k").unwrap(), Some(b"same".to_vec()));
    assert_eq!(cache.size(), 1);
}

/// I4 / no-resurrection: many threads concurrently put and get disjoint
/// key ranges; no thread should ever observe a torn or foreign value for
/// its own keys.
#[test]
fn concurrent_put_get_never_cross_contaminates_values() {
    let cache = Arc::new(cache_for_tests(10_000, 500));
    let mut handles = Vec::new();

    for t in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                let key = format!("t{t}-k{i}");
                let value = format!("t{t}-v{i}").into_bytes();
                cache.put(&key, value.clone()).unwrap();
                let seen = cache.get(&key).unwrap();
                assert!(
                    seen == Some(value.clone()) || seen.is_none(),
                    "thread {t} saw a foreign value for its own key {key}: {seen:?}"
                );
            }
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        join_with_deadlock_guard(handle, &format!("worker thread {i}"));
    }
}

/// P2 / P5: with capacity far smaller than the number of unique keys
/// written, after quiescence the store settles at or near capacity and
/// the most-recently-written keys are the ones that survive.
#[test]
fn p5_eviction_under_pressure_retains_recent_keys() {
    let capacity = 100;
    let batch_size = 50;
    let cache = cache_for_tests(capacity, batch_size);

    for i in 0..1000 {
        cache.put(&format!("k{i}"), vec![(i % 256) as u8]).unwrap();
    }

    // Quiescence: one drainer period + one evictor period, generously
    // bounded (spec I2).
    thread::sleep(Duration::from_millis(300));

    assert!(
        cache.size() <= capacity + batch_size,
        "size {} exceeded capacity+batch_size bound",
        cache.size()
    );

    let mut hits = HashSet::new();
    for i in 900..1000 {
        if cache.get(&format!("k{i}")).unwrap().is_some() {
            hits.insert(i);
        }
    }
    assert!(
        !hits.is_empty(),
        "expected at least some of the most-recently-written keys to survive eviction"
    );

    cache.close();
}

/// P2: after a shutdown-timeout-scale quiescent period, size settles at
/// or under capacity.
#[test]
fn p2_size_settles_at_or_under_capacity_after_quiescence() {
    let capacity = 200;
    let cache = cache_for_tests(capacity, 100);

    for i in 0..2000 {
        cache.put(&format!("k{i}"), vec![0u8]).unwrap();
    }

    thread::sleep(Duration::from_millis(500));

    assert!(cache.size() <= capacity + 100);
    cache.close();
}

#[test]
fn concurrent_ops_do_not_deadlock() {
    let cache = Arc::new(cache_for_tests(500, 200));
    let mut handles = Vec::new();

    for t in 0..4 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..1000 {
                let key = format!("k{}", (t * 1000 + i) % 300);
                cache.put(&key, vec![i as u8]).unwrap();
                let _ = cache.get(&key);
                let _ = cache.size();
                let _ = cache.pending_eviction_count();
            }
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        join_with_deadlock_guard(handle, &format!("worker thread {i}"));
    }
}
