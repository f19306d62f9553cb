//! LFU-LRU Engine Module
//!
//! Frequency-ordered eviction with a recency tie-break.
//!
//! Every frequency level owns a [`Bucket`]: an index of its keys plus a
//! recency chain over them. A use moves a key to the front of the next
//! bucket up; eviction pops the back of the lowest non-empty bucket.
//! Finding that bucket scans upward from frequency zero, so eviction costs
//! O(distinct frequency levels) in the worst case.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::cache::engine::{effective_capacity, CacheEngine};
use crate::cache::recency::{Handle, RecencyList};
use crate::cache::CacheEntry;
use crate::error::CacheError;

// == Bucket ==
/// Keys sharing one frequency, ordered by when they entered the bucket.
#[derive(Debug, Default)]
struct Bucket {
    members: HashMap<String, Handle>,
    order: RecencyList<String>,
}

impl Bucket {
    fn add(&mut self, key: &str) {
        let handle = self.order.push_front(key.to_string());
        self.members.insert(key.to_string(), handle);
    }

    fn remove(&mut self, key: &str) {
        if let Some(handle) = self.members.remove(key) {
            self.order.remove(handle);
        }
    }

    fn pop_lru(&mut self) -> Option<String> {
        let key = self.order.pop_back()?;
        self.members.remove(&key);
        Some(key)
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug)]
struct TieredSlot {
    entry: CacheEntry,
    frequency: usize,
}

// == LFU-LRU Engine ==
/// Evicts the least recently used key among the least frequently used ones.
#[derive(Debug)]
pub struct LfuLruEngine {
    entries: HashMap<String, TieredSlot>,
    /// `buckets[f]` holds every key whose frequency is `f`
    buckets: Vec<Bucket>,
    capacity: usize,
}

impl LfuLruEngine {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            buckets: vec![Bucket::default()],
            capacity: effective_capacity(capacity),
        }
    }

    /// Drops `key` if its deadline has passed. Returns true when it did.
    fn expire_if_due(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|slot| slot.entry.is_expired());
        if expired {
            debug!(key, "removing expired lfu-lru entry");
            self.delete(key);
        }
        expired
    }

    /// Moves `key` to the front of the next bucket up.
    fn bump(&mut self, key: &str) {
        let Some(slot) = self.entries.get_mut(key) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(slot.frequency) {
            bucket.remove(key);
        }
        slot.frequency += 1;
        if slot.frequency == self.buckets.len() {
            self.buckets.push(Bucket::default());
        }
        self.buckets[slot.frequency].add(key);
    }

    fn evict_one(&mut self) -> Result<String, CacheError> {
        let victim = self
            .buckets
            .iter_mut()
            .find(|bucket| !bucket.is_empty())
            .and_then(Bucket::pop_lru)
            .ok_or(CacheError::LedgerInconsistent {
                entries: self.entries.len(),
            })?;
        self.entries.remove(&victim);
        Ok(victim)
    }
}

impl CacheEngine for LfuLruEngine {
    fn exists(&mut self, key: &str) -> bool {
        !self.expire_if_due(key) && self.entries.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Option<String> {
        if self.expire_if_due(key) {
            return None;
        }
        let value = self.entries.get(key)?.entry.value.clone();
        self.bump(key);
        Some(value)
    }

    fn set(&mut self, key: &str, value: String, exptime: i64) {
        self.expire_if_due(key);

        if self.entries.contains_key(key) {
            self.bump(key);
            if let Some(slot) = self.entries.get_mut(key) {
                slot.entry.value = value;
                slot.entry.refresh_expiry(exptime);
            }
            return;
        }

        if self.entries.len() >= self.capacity {
            match self.evict_one() {
                Ok(victim) => debug!(key = %victim, "evicted lru entry of lowest frequency"),
                Err(err) => {
                    error!(error = %err, "eviction found no victim");
                    debug_assert!(self.entries.is_empty(), "{err}");
                }
            }
        }
        self.entries.insert(
            key.to_string(),
            TieredSlot {
                entry: CacheEntry::new(value, exptime),
                frequency: 0,
            },
        );
        self.buckets[0].add(key);
    }

    fn delete(&mut self, key: &str) {
        if let Some(slot) = self.entries.remove(key) {
            if let Some(bucket) = self.buckets.get_mut(slot.frequency) {
                bucket.remove(key);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
