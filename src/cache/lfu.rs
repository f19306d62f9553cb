//! LFU Engine Module
//!
//! Frequency-ordered eviction over unordered frequency buckets.
//!
//! Which key is evicted among keys sharing the lowest frequency is
//! unspecified: buckets are hash sets and their iteration order decides.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error};

use crate::cache::engine::{effective_capacity, CacheEngine};
use crate::cache::CacheEntry;
use crate::error::CacheError;

#[derive(Debug)]
struct LfuSlot {
    entry: CacheEntry,
    frequency: usize,
}

// == LFU Engine ==
/// Evicts a member of the lowest non-empty frequency bucket.
#[derive(Debug)]
pub struct LfuEngine {
    entries: HashMap<String, LfuSlot>,
    /// `buckets[f]` holds every key whose frequency is `f`
    buckets: Vec<HashSet<String>>,
    capacity: usize,
}

impl LfuEngine {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            buckets: vec![HashSet::new()],
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
            debug!(key, "removing expired lfu entry");
            self.delete(key);
        }
        expired
    }

    /// Moves `key` one bucket up, growing the ledger by one when needed.
    fn bump(&mut self, key: &str) {
        let Some(slot) = self.entries.get_mut(key) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(slot.frequency) {
            bucket.remove(key);
        }
        slot.frequency += 1;
        if slot.frequency == self.buckets.len() {
            self.buckets.push(HashSet::new());
        }
        self.buckets[slot.frequency].insert(key.to_string());
    }

    fn evict_one(&mut self) -> Result<String, CacheError> {
        let victim = self
            .buckets
            .iter()
            .find_map(|bucket| bucket.iter().next().cloned())
            .ok_or(CacheError::LedgerInconsistent {
                entries: self.entries.len(),
            })?;
        self.delete(&victim);
        Ok(victim)
    }
}

impl CacheEngine for LfuEngine {
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
                Ok(victim) => debug!(key = %victim, "evicted least frequently used entry"),
                Err(err) => {
                    error!(error = %err, "eviction found no victim");
                    debug_assert!(self.entries.is_empty(), "{err}");
                }
            }
        }
        self.entries.insert(
            key.to_string(),
            LfuSlot {
                entry: CacheEntry::new(value, exptime),
                frequency: 0,
            },
        );
        self.buckets[0].insert(key.to_string());
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
