//! Memoization Walkthrough Demo
//!
//! Demonstrates the main call shapes, shared stores, and the introspection
//! views.
//!
//! Usage:
//!   cargo run --example memoize_demo
//!
//! Environment variables:
//!   RUST_LOG - tracing filter (default: debug, try RUST_LOG=memofn=debug)

use memofn::{memo_fn, memo_fn2, memo_supplier, InMemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    info!("=== memofn Demo ===");

    info!("--- One-argument function, identity key ---");
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let slow_upper = memo_fn(move |s: &String| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        s.to_uppercase()
    });

    info!("First call (miss, computes): {}", slow_upper.call("hello".to_string())?);
    info!("Second call (hit, cached):   {}", slow_upper.call("hello".to_string())?);
    info!("Underlying computation ran {} time(s)", calls.load(Ordering::SeqCst));
    info!("Store stats: {}", slow_upper.store().stats());

    info!("--- Two-argument function, combined hash key ---");
    let area = memo_fn2(|w: &u32, h: &u32| w * h);
    info!("area(6, 7) = {}", area.call2(6, 7)?);
    info!("area(6, 7) = {} (cached)", area.call2(6, 7)?);

    info!("--- Supplier, constant key ---");
    let config = memo_supplier(|| {
        info!("loading configuration (runs once)");
        "listen=0.0.0.0:8080".to_string()
    });
    info!("config: {}", config.get()?);
    info!("config: {}", config.get()?);

    info!("--- Shared caller-supplied store ---");
    let store = Arc::new(InMemoryStore::new());
    let double = memo_fn(|n: &u32| n * 2).with_store(Arc::clone(&store));
    double.call(21)?;
    drop(double);
    info!("store retains {} entry after the memoizer is gone", store.len());

    info!("--- Snapshot view ---");
    for entry in store.snapshot() {
        info!(
            "key={} value={} hits={} age={:?}",
            entry.key,
            entry.value,
            entry.hits,
            entry.age()
        );
    }

    Ok(())
}
