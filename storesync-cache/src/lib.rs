//! Bounded, concurrent id-to-key cache.
//!
//! The reference resolver hits this cache once per reference; anything not
//! cached is fetched in batch and written back, including the
//! key-not-set placeholder for resources that exist without a key. Entries
//! are sharded so concurrent resolution of a batch never funnels through a
//! single lock, and each shard evicts its oldest entries first once the
//! overall capacity is reached.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use storesync_types::{Key, ResourceId};
use tracing::debug;

const DEFAULT_SHARD_COUNT: usize = 16;

struct Shard {
    entries: HashMap<ResourceId, Key>,
    // Insertion order, oldest first. Ids evicted from `entries` are lazily
    // skipped when they resurface here.
    order: VecDeque<ResourceId>,
}

impl Shard {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn insert(&mut self, id: ResourceId, key: Key, shard_capacity: usize) {
        if self.entries.insert(id.clone(), key).is_none() {
            self.order.push_back(id);
        }
        while self.entries.len() > shard_capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// Concurrent map from platform id to portable key, bounded in size.
///
/// Shared between sync runs behind an `Arc`; repeated runs over the same
/// data reuse earlier lookups, including negative ones recorded as the
/// placeholder key.
pub struct KeyCache {
    shards: Vec<RwLock<Shard>>,
    shard_capacity: usize,
    capacity: usize,
}

impl KeyCache {
    /// Creates a cache holding at most `capacity` entries. A zero capacity
    /// is bumped to one entry per shard so `put` never becomes a no-op.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_shards(capacity, DEFAULT_SHARD_COUNT)
    }

    /// Creates a cache with an explicit shard count. More shards lower
    /// contention at the cost of a coarser effective capacity.
    #[must_use]
    pub fn with_shards(capacity: usize, shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shard_capacity = (capacity / shard_count).max(1);
        let shards = (0..shard_count).map(|_| RwLock::new(Shard::new())).collect();
        Self {
            shards,
            shard_capacity,
            capacity: shard_capacity * shard_count,
        }
    }

    fn shard_for(&self, id: &ResourceId) -> &RwLock<Shard> {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % self.shards.len()]
    }

    /// Returns the cached key for `id`, if present. The placeholder key is
    /// returned like any other hit.
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<Key> {
        self.shard_for(id).read().unwrap().entries.get(id).cloned()
    }

    /// Returns true if `id` has a cached mapping.
    #[must_use]
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.shard_for(id).read().unwrap().entries.contains_key(id)
    }

    /// Records a mapping, evicting the oldest entries in the target shard
    /// once it is full.
    pub fn put(&self, id: ResourceId, key: Key) {
        self.shard_for(&id)
            .write()
            .unwrap()
            .insert(id, key, self.shard_capacity);
    }

    /// Records a batch of mappings.
    pub fn put_all<I: IntoIterator<Item = (ResourceId, Key)>>(&self, mappings: I) {
        let mut inserted = 0usize;
        for (id, key) in mappings {
            self.put(id, key);
            inserted += 1;
        }
        if inserted > 0 {
            debug!(inserted, "cached key mappings");
        }
    }

    /// Drops every cached mapping.
    pub fn clear(&self) {
        for shard in &self.shards {
            let mut guard = shard.write().unwrap();
            guard.entries.clear();
            guard.order.clear();
        }
    }

    /// Number of cached mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.read().unwrap().entries.len())
            .sum()
    }

    /// Returns true if no mappings are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Effective capacity after rounding to whole shards.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for KeyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
