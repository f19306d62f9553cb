//! Request DTOs for the cache server API
//!
//! Every verb is a GET; its arguments arrive as query parameters.

use serde::Deserialize;

/// Exptime used when the caller supplies none: never expires.
pub const DEFAULT_EXPTIME: &str = "-1";

/// Query parameters for the storage verbs (set, add, replace, append, prepend)
///
/// # Fields
/// - `val`: The value to store (may be empty)
/// - `exp`: Relative exptime in seconds, kept as text for the adapter to parse
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreParams {
    #[serde(default)]
    pub val: String,
    #[serde(default)]
    pub exp: Option<String>,
}

impl StoreParams {
    /// Returns the exptime text, substituting the no-expiry default when
    /// the parameter is absent or empty.
    pub fn exptime(&self) -> &str {
        exptime_or_default(self.exp.as_deref())
    }
}

/// Query parameters for increment/decrement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NumParams {
    #[serde(default)]
    pub num: String,
}

/// Query parameters for compare-and-swap
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CasParams {
    #[serde(default)]
    pub val: String,
    #[serde(default)]
    pub exp: Option<String>,
    #[serde(default)]
    pub token: String,
}

impl CasParams {
    pub fn exptime(&self) -> &str {
        exptime_or_default(self.exp.as_deref())
    }
}

fn exptime_or_default(exp: Option<&str>) -> &str {
    match exp {
        Some(exp) if !exp.is_empty() => exp,
        _ => DEFAULT_EXPTIME,
    }
}
