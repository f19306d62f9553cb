//! LRU Engine Module
//!
//! Recency-ordered eviction: a key index over a [`RecencyList`], evicting
//! from the back.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::engine::{effective_capacity, CacheEngine};
use crate::cache::recency::{Handle, RecencyList};
use crate::cache::CacheEntry;

#[derive(Debug)]
struct LruNode {
    key: String,
    entry: CacheEntry,
}

// == LRU Engine ==
/// Evicts the least recently used entry when a new key would exceed capacity.
#[derive(Debug)]
pub struct LruEngine {
    /// Key to list handle
    index: HashMap<String, Handle>,
    /// Entries by recency, front = most recent
    order: RecencyList<LruNode>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl LruEngine {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            capacity: effective_capacity(capacity),
        }
    }

    /// Returns the live handle for `key`, dropping the entry if it expired.
    fn live_handle(&mut self, key: &str) -> Option<Handle> {
        let handle = *self.index.get(key)?;
        let expired = self
            .order
            .get(handle)
            .map_or(true, |node| node.entry.is_expired());
        if expired {
            debug!(key, "removing expired lru entry");
            self.delete(key);
            return None;
        }
        Some(handle)
    }

    fn evict_oldest(&mut self) {
        if let Some(node) = self.order.pop_back() {
            debug!(key = %node.key, "evicted least recently used entry");
            self.index.remove(&node.key);
        }
    }
}

impl CacheEngine for LruEngine {
    fn exists(&mut self, key: &str) -> bool {
        self.live_handle(key).is_some()
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let handle = self.live_handle(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|node| node.entry.value.clone())
    }

    fn set(&mut self, key: &str, value: String, exptime: i64) {
        if let Some(handle) = self.live_handle(key) {
            if let Some(node) = self.order.get_mut(handle) {
                node.entry.value = value;
                node.entry.refresh_expiry(exptime);
            }
            self.order.move_to_front(handle);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_oldest();
        }
        let handle = self.order.push_front(LruNode {
            key: key.to_string(),
            entry: CacheEntry::new(value, exptime),
        });
        self.index.insert(key.to_string(), handle);
    }

    fn delete(&mut self, key: &str) {
        if let Some(handle) = self.index.remove(key) {
            self.order.remove(handle);
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
