//! Cache Module
//!
//! Eviction engines for the memcached-style cache: plain LRU, plain LFU and
//! LFU with an LRU tie-break, all behind the [`CacheEngine`] trait.

mod engine;
mod entry;
mod lfu;
mod lfu_lru;
mod lru;
mod recency;


// Re-export public types
pub use engine::{normalize_capacity, CacheEngine, EvictionPolicy};
pub use entry::CacheEntry;
pub use lfu::LfuEngine;
pub use lfu_lru::LfuLruEngine;
pub use lru::LruEngine;
pub use recency::{Handle, RecencyList};
