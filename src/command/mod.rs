//! Command Module
//!
//! The memcached verb set and its reply vocabulary.

mod adapter;
mod reply;

pub use adapter::CommandAdapter;
pub use reply::{Reply, Token};
