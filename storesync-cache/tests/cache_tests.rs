use std::sync::Arc;
use std::thread;
use storesync_cache::KeyCache;
use storesync_types::{Key, ResourceId};

// ── Basic operations ──────────────────────────────────────────────

#[test]
fn put_then_get() {
    let cache = KeyCache::new(100);
    cache.put(ResourceId::new("c1"), Key::new("summer"));
    assert_eq!(cache.get(&ResourceId::new("c1")), Some(Key::new("summer")));
    assert!(cache.contains(&ResourceId::new("c1")));
}

#[test]
fn miss_returns_none() {
    let cache = KeyCache::new(100);
    assert_eq!(cache.get(&ResourceId::new("missing")), None);
    assert!(!cache.contains(&ResourceId::new("missing")));
}

#[test]
fn put_overwrites_without_growing() {
    let cache = KeyCache::new(100);
    cache.put(ResourceId::new("c1"), Key::new("old"));
    cache.put(ResourceId::new("c1"), Key::new("new"));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&ResourceId::new("c1")), Some(Key::new("new")));
}

#[test]
fn put_all_and_len() {
    let cache = KeyCache::new(100);
    cache.put_all((0..10).map(|i| (ResourceId::new(format!("id-{i}")), Key::new(format!("k-{i}")))));
    assert_eq!(cache.len(), 10);
}

#[test]
fn clear_empties_the_cache() {
    let cache = KeyCache::new(100);
    cache.put(ResourceId::new("c1"), Key::new("summer"));
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.get(&ResourceId::new("c1")), None);
}

// ── Placeholder entries ───────────────────────────────────────────

#[test]
fn placeholder_is_cached_like_a_real_key() {
    let cache = KeyCache::new(100);
    cache.put(ResourceId::new("keyless"), Key::placeholder());
    let hit = cache.get(&ResourceId::new("keyless")).unwrap();
    assert!(hit.is_placeholder());
}

// ── Capacity and eviction ─────────────────────────────────────────

#[test]
fn zero_capacity_still_stores_something() {
    let cache = KeyCache::new(0);
    assert!(cache.capacity() > 0);
    cache.put(ResourceId::new("c1"), Key::new("summer"));
    assert_eq!(cache.get(&ResourceId::new("c1")), Some(Key::new("summer")));
}

#[test]
fn explicit_shard_count_rounds_capacity_to_whole_shards() {
    let cache = KeyCache::with_shards(100, 4);
    assert_eq!(cache.capacity(), 100);
    cache.put(ResourceId::new("c1"), Key::new("summer"));
    assert_eq!(cache.get(&ResourceId::new("c1")), Some(Key::new("summer")));
}

#[test]
fn eviction_never_exceeds_capacity() {
    let cache = KeyCache::new(64);
    for i in 0..1000 {
        cache.put(ResourceId::new(format!("id-{i}")), Key::new(format!("k-{i}")));
    }
    assert!(cache.len() <= cache.capacity());
}

#[test]
fn oldest_entries_are_evicted_first() {
    // One entry per shard, so a second insert into any shard evicts the
    // first id routed there.
    let cache = KeyCache::new(16);
    for i in 0..64 {
        cache.put(ResourceId::new(format!("id-{i}")), Key::new(format!("k-{i}")));
    }
    // The most recent insert always survives.
    assert_eq!(cache.get(&ResourceId::new("id-63")), Some(Key::new("k-63")));
    assert!(cache.len() <= 16);
}

// ── Concurrency ───────────────────────────────────────────────────

#[test]
fn concurrent_readers_and_writers() {
    let cache = Arc::new(KeyCache::new(10_000));
    let mut handles = Vec::new();
    for t in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                let id = ResourceId::new(format!("t{t}-{i}"));
                cache.put(id.clone(), Key::new(format!("k{t}-{i}")));
                assert!(cache.get(&id).is_some());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 8 * 500);
}
