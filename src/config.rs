//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::{normalize_capacity, EvictionPolicy};
use crate::error::Result;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Eviction policy backing the cache
    pub policy: EvictionPolicy,
    /// Maximum number of entries, `usize::MAX` when unbounded
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `lru`, `lfu` or `lfu-lru-tiebreak` (default: lfu)
    /// - `CACHE_CAPACITY` - Maximum entries; absent, invalid or <= 0 means unbounded
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    ///
    /// # Errors
    /// Returns `CacheError::UnknownPolicy` for an unrecognised policy name.
    pub fn from_env() -> Result<Self> {
        let policy = match env::var("CACHE_POLICY") {
            Ok(name) => name.parse()?,
            Err(_) => EvictionPolicy::Lfu,
        };

        Ok(Self {
            policy,
            capacity: parse_capacity(env::var("CACHE_CAPACITY").ok().as_deref()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: EvictionPolicy::Lfu,
            capacity: usize::MAX,
            server_port: 4000,
        }
    }
}

fn parse_capacity(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(usize::MAX, normalize_capacity)
}
