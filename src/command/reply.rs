//! Reply taxonomy returned by every adapter verb.

use std::fmt;

use serde::Serialize;

// == Reply ==
/// Protocol-level outcome of a cache command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reply {
    Stored,
    NotStored,
    Error,
    NotImplemented,
    Value,
    NotFound,
    Deleted,
    ClientError,
}

impl Reply {
    /// The literal wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reply::Stored => "STORED",
            Reply::NotStored => "NOT_STORED",
            Reply::Error => "ERROR",
            Reply::NotImplemented => "NOT_IMPLEMENTED",
            Reply::Value => "VALUE",
            Reply::NotFound => "NOT_FOUND",
            Reply::Deleted => "DELETED",
            Reply::ClientError => "CLIENT_ERROR",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Token ==
/// Compare-and-swap token. Never issued yet; only carried through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token(pub String);
