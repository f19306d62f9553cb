//! Cache Entry Module
//!
//! Defines the value-plus-deadline record shared by every eviction engine.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value together with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, converting a relative exptime into a deadline.
    ///
    /// A non-positive `exptime` means the entry never expires.
    pub fn new(value: String, exptime: i64) -> Self {
        Self {
            value,
            expires_at: deadline_from(exptime),
        }
    }

    // == Refresh Expiry ==
    /// Moves the deadline when `exptime` is positive.
    ///
    /// Updates with a non-positive exptime keep the current deadline, they
    /// do not reset it to "never".
    pub fn refresh_expiry(&mut self, exptime: i64) {
        if let Some(deadline) = deadline_from(exptime) {
            self.expires_at = Some(deadline);
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal
    /// to its deadline.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Converts a relative exptime in seconds into an absolute deadline.
fn deadline_from(exptime: i64) -> Option<u64> {
    if exptime <= 0 {
        return None;
    }
    let millis = (exptime as u64).saturating_mul(1000);
    Some(current_timestamp_ms().saturating_add(millis))
}
