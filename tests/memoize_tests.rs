//! Integration tests for the memoization engine
//!
//! These tests verify the externally observable behavior end to end:
//! - Idempotent computation and key independence
//! - Side-effect-once procedures
//! - Concurrent single computation per key
//! - Supplier constant-key caching
//! - Error propagation and the absence of negative caching
//! - Store-failure translation at the backing-store seam
//! - Shared stores and custom key functions

use memofn::{
    memo_fn, memo_fn2, memo_proc, memo_supplier, try_memo_fn, BackingStore, FnKey, InMemoryStore,
    MemoError, Memoizer, PureFn,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_idempotent_computation() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let upper = memo_fn(move |s: &String| {
        counter.fetch_add(1, Ordering::SeqCst);
        s.to_uppercase()
    });

    assert_eq!(upper.call("a".to_string()).unwrap(), "A");
    assert_eq!(upper.call("a".to_string()).unwrap(), "A");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_key_independence() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let upper = memo_fn(move |s: &String| {
        counter.fetch_add(1, Ordering::SeqCst);
        s.to_uppercase()
    });

    assert_eq!(upper.call("a".to_string()).unwrap(), "A");
    assert_eq!(upper.call("b".to_string()).unwrap(), "B");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_side_effect_once_for_procedures() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let record = memo_proc(move |entry: &String| {
        sink.lock().unwrap().push(entry.clone());
    });

    record.call("x".to_string()).unwrap();
    record.call("x".to_string()).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["x".to_string()]);
}

#[test]
fn test_concurrent_single_computation() {
    init_tracing();

    const THREADS: usize = 8;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let slow = Arc::new(memo_fn(move |key: &String| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        format!("computed for {}", key)
    }));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let slow = Arc::clone(&slow);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                slow.call("same-key".to_string()).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "computed for same-key");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_supplier_default_constant_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let expensive = memo_supplier(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        vec![1, 2, 3]
    });

    assert_eq!(expensive.get().unwrap(), vec![1, 2, 3]);
    assert_eq!(expensive.get().unwrap(), vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(expensive.store().len(), 1);
}

#[test]
fn test_error_propagation_round_trip() {
    #[derive(Debug, thiserror::Error)]
    #[error("downstream unavailable")]
    struct DownstreamUnavailable;

    let lookup = try_memo_fn(|_id: &String| -> Result<String, DownstreamUnavailable> {
        Err(DownstreamUnavailable)
    });

    let err = lookup.call("user-1".to_string()).unwrap_err();
    assert!(err.is_computation());
    assert!(err.cause().downcast_ref::<DownstreamUnavailable>().is_some());

    // No poisoned negative caching: the failed key is absent from the
    // introspection view, and the next call fails the same way.
    assert!(lookup.store().snapshot().is_empty());
    assert!(!lookup.store().contains_key(&"user-1".to_string()));

    let err = lookup.call("user-1".to_string()).unwrap_err();
    assert!(err.is_computation());
}

/// Test double for the evicting/loading conformance class: the store's own
/// machinery fails before the computation ever runs.
struct OfflineStore;

impl<K, V> BackingStore<K, V> for OfflineStore {
    fn get_or_compute<F>(&self, _key: K, _compute: F) -> memofn::Result<V>
    where
        F: FnOnce() -> memofn::Result<V>,
    {
        Err(MemoError::store(anyhow::anyhow!("cache backend offline")))
    }
}

#[test]
fn test_store_failure_is_distinct_from_computation_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let memo = memo_fn(move |n: &u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        n + 1
    })
    .with_store(Arc::new(OfflineStore));

    let err = memo.call(1).unwrap_err();
    assert!(err.is_store());
    assert!(!err.is_computation());
    assert!(err.to_string().contains("backing store failure"));

    // The computation never ran; the failure came from the store itself.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_shared_store_survives_memoizer() {
    let store = Arc::new(InMemoryStore::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let first = memo_fn(move |n: &u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        n * 2
    })
    .with_store(Arc::clone(&store));

    assert_eq!(first.call(21).unwrap(), 42);
    drop(first);

    // The caller-supplied store keeps its entries; a second memoizer over
    // the same store serves the cached value without recomputing.
    assert_eq!(store.len(), 1);

    let counter = Arc::clone(&calls);
    let second = memo_fn(move |n: &u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        n * 2
    })
    .with_store(Arc::clone(&store));

    assert_eq!(second.call(21).unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_custom_key_function() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    // Case-insensitive keying: "HI" and "hi" share one entry.
    let upper = Memoizer::with_parts(
        PureFn(move |s: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.to_uppercase()
        }),
        FnKey(|args: &(String,)| args.0.to_lowercase()),
        Arc::new(InMemoryStore::new()),
    );

    assert_eq!(upper.call("HI".to_string()).unwrap(), "HI");
    assert_eq!(upper.call("hi".to_string()).unwrap(), "HI");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_combined_hash_key_order_sensitivity() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let concat = memo_fn2(move |a: &String, b: &String| {
        counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{}", a, b)
    });

    assert_eq!(concat.call2("a".to_string(), "b".to_string()).unwrap(), "ab");
    assert_eq!(concat.call2("b".to_string(), "a".to_string()).unwrap(), "ba");
    assert_eq!(concat.call2("a".to_string(), "b".to_string()).unwrap(), "ab");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_stats_and_snapshot_views() {
    let upper = memo_fn(|s: &String| s.to_uppercase());

    upper.call("a".to_string()).unwrap();
    upper.call("a".to_string()).unwrap();
    upper.call("b".to_string()).unwrap();

    let stats = upper.store().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.computations, 2);
    assert_eq!(stats.entries, 2);

    let mut snapshot = upper.store().snapshot();
    snapshot.sort_by(|a, b| a.key.cmp(&b.key));
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].key, "a");
    assert_eq!(snapshot[0].value, "A");
    assert_eq!(snapshot[0].hits, 1);
    assert_eq!(snapshot[1].key, "b");
    assert_eq!(snapshot[1].hits, 0);
}
