//! Mini Memcached - An in-process memcached-style cache
//!
//! Provides memcached verbs (set, add, replace, append, prepend, incr, decr,
//! get, delete) over a pluggable eviction engine: LRU, LFU, or LFU with an
//! LRU tie-break.

pub mod api;
pub mod cache;
pub mod command;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use command::{CommandAdapter, Reply};
pub use config::Config;
