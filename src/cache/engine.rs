//! Engine Module
//!
//! The capability interface every eviction engine implements, plus the
//! policy selector used to build one from configuration.

use std::fmt;
use std::str::FromStr;

use crate::cache::{LfuEngine, LfuLruEngine, LruEngine};
use crate::error::CacheError;

// == Cache Engine ==
/// Storage contract shared by all eviction policies.
///
/// Absence is reported through `bool`/`Option`, never through errors.
/// Engines are not synchronised; callers serialise access.
pub trait CacheEngine: Send {
    /// Returns true iff a non-expired entry is stored for `key`.
    ///
    /// Does not count as a use. An expired match is removed on the spot.
    fn exists(&mut self, key: &str) -> bool;

    /// Returns the current value of a live entry and records a use.
    fn get(&mut self, key: &str) -> Option<String>;

    /// Inserts or updates `key`.
    ///
    /// Inserting evicts first when at capacity and always derives the
    /// deadline from `exptime`. Updating counts as a use and only moves the
    /// deadline when `exptime` is positive.
    fn set(&mut self, key: &str, value: String, exptime: i64);

    /// Removes `key` if present.
    fn delete(&mut self, key: &str);

    /// Number of physically stored entries, expired ones included until
    /// they are touched.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;
}

// == Eviction Policy ==
/// The eviction policies selectable at deployment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    Lru,
    Lfu,
    LfuLruTiebreak,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::LfuLruTiebreak => "lfu-lru-tiebreak",
        }
    }

    // == Build Engine ==
    /// Creates an empty engine for this policy.
    pub fn build(self, capacity: usize) -> Box<dyn CacheEngine> {
        match self {
            EvictionPolicy::Lru => Box::new(LruEngine::new(capacity)),
            EvictionPolicy::Lfu => Box::new(LfuEngine::new(capacity)),
            EvictionPolicy::LfuLruTiebreak => Box::new(LfuLruEngine::new(capacity)),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "lfu-lru-tiebreak" | "lfu-lru-t" => Ok(EvictionPolicy::LfuLruTiebreak),
            other => Err(CacheError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Capacity ==
/// Maps a configured capacity onto an entry bound.
///
/// Non-positive values mean "effectively unbounded", never zero capacity.
pub fn normalize_capacity(raw: i64) -> usize {
    if raw <= 0 {
        usize::MAX
    } else {
        usize::try_from(raw).unwrap_or(usize::MAX)
    }
}

/// Zero is not a usable bound; engines treat it as unbounded.
pub(crate) fn effective_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        usize::MAX
    } else {
        capacity
    }
}
