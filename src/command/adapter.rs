//! Command Adapter Module
//!
//! Translates memcached verbs onto a [`CacheEngine`] held behind one mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::cache::{CacheEngine, EvictionPolicy};
use crate::command::{Reply, Token};
use crate::error::{CacheError, Result};

// == Command Adapter ==
/// Thread-safe memcached command set over a single engine.
///
/// Every verb holds the lock for its whole read-modify-write, so verbs are
/// atomic with respect to each other.
pub struct CommandAdapter {
    engine: Mutex<Box<dyn CacheEngine>>,
}

impl CommandAdapter {
    // == Constructor ==
    /// Wraps an already built engine.
    pub fn new(engine: Box<dyn CacheEngine>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Builds an empty engine for `policy` and wraps it.
    pub fn with_policy(policy: EvictionPolicy, capacity: usize) -> Self {
        if capacity == usize::MAX {
            info!(%policy, capacity = "unbounded", "cache engine initialized");
        } else {
            info!(%policy, capacity, "cache engine initialized");
        }
        Self::new(policy.build(capacity))
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn CacheEngine>> {
        // Engine state stays consistent between verbs, so a poisoned lock
        // is still safe to reuse.
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Storage Verbs ==
    /// Stores unconditionally.
    pub fn set(&self, key: &str, val: &str, exptime: &str) -> Reply {
        let mut engine = self.lock();
        let exptime = match parse_int(exptime) {
            Ok(exptime) => exptime,
            Err(err) => return client_error(err),
        };
        engine.set(key, val.to_string(), exptime);
        Reply::Stored
    }

    /// Stores only if `key` is absent.
    pub fn add(&self, key: &str, val: &str, exptime: &str) -> Reply {
        let mut engine = self.lock();
        let exptime = match parse_int(exptime) {
            Ok(exptime) => exptime,
            Err(err) => return client_error(err),
        };
        if engine.exists(key) {
            return Reply::NotStored;
        }
        engine.set(key, val.to_string(), exptime);
        Reply::Stored
    }

    /// Stores only if `key` is present.
    pub fn replace(&self, key: &str, val: &str, exptime: &str) -> Reply {
        let mut engine = self.lock();
        let exptime = match parse_int(exptime) {
            Ok(exptime) => exptime,
            Err(err) => return client_error(err),
        };
        if !engine.exists(key) {
            return Reply::NotStored;
        }
        engine.set(key, val.to_string(), exptime);
        Reply::Stored
    }

    pub fn append(&self, key: &str, val: &str, exptime: &str) -> Reply {
        self.concat(key, val, exptime, Placement::After)
    }

    pub fn prepend(&self, key: &str, val: &str, exptime: &str) -> Reply {
        self.concat(key, val, exptime, Placement::Before)
    }

    fn concat(&self, key: &str, val: &str, exptime: &str, placement: Placement) -> Reply {
        let mut engine = self.lock();
        let exptime = match parse_int(exptime) {
            Ok(exptime) => exptime,
            Err(err) => return client_error(err),
        };
        let Some(current) = engine.get(key) else {
            return Reply::NotStored;
        };
        let combined = match placement {
            Placement::After => current + val,
            Placement::Before => format!("{val}{current}"),
        };
        engine.set(key, combined, exptime);
        Reply::Stored
    }

    // == Arithmetic Verbs ==
    pub fn increment(&self, key: &str, num: &str) -> Reply {
        self.arithmetic(key, num, i64::checked_add)
    }

    pub fn decrement(&self, key: &str, num: &str) -> Reply {
        self.arithmetic(key, num, i64::checked_sub)
    }

    /// Applies `op` to the stored number and the operand.
    ///
    /// Stores with exptime 0, which keeps whatever deadline the key had.
    fn arithmetic(&self, key: &str, num: &str, op: fn(i64, i64) -> Option<i64>) -> Reply {
        let mut engine = self.lock();
        let Some(current) = engine.get(key) else {
            return Reply::NotFound;
        };
        let result = parse_int(num).and_then(|operand| {
            let stored = parse_int(&current)?;
            op(stored, operand).ok_or(CacheError::InvalidNumber(format!(
                "{stored} overflows with operand {operand}"
            )))
        });
        match result {
            Ok(value) => {
                engine.set(key, value.to_string(), 0);
                Reply::Stored
            }
            Err(err) => client_error(err),
        }
    }

    // == Retrieval Verbs ==
    /// Returns [`Reply::Value`] with the payload, or [`Reply::NotFound`].
    pub fn get(&self, key: &str) -> (Reply, Option<String>) {
        let mut engine = self.lock();
        match engine.get(key) {
            Some(value) => (Reply::Value, Some(value)),
            None => (Reply::NotFound, None),
        }
    }

    pub fn delete(&self, key: &str) -> Reply {
        let mut engine = self.lock();
        if !engine.exists(key) {
            return Reply::NotFound;
        }
        engine.delete(key);
        Reply::Deleted
    }

    /// Number of physically stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Unimplemented Verbs ==
    pub fn compare_and_swap(
        &self,
        _key: &str,
        _val: &str,
        _exptime: &str,
        _token: &Token,
    ) -> Reply {
        Reply::NotImplemented
    }

    pub fn get_entry_plus_token(&self, _key: &str) -> (Reply, Option<String>, Option<Token>) {
        (Reply::NotImplemented, None, None)
    }

    pub fn clear(&self) -> Reply {
        Reply::NotImplemented
    }

    pub fn stats(&self) -> Reply {
        Reply::NotImplemented
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Before,
    After,
}

fn parse_int(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| CacheError::InvalidNumber(text.to_string()))
}

fn client_error(err: CacheError) -> Reply {
    debug!(error = %err, "rejecting command");
    Reply::ClientError
}
