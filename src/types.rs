//! Strata - Core Type Definitions
//! Defines the record type shared by the memtable flush path and the
//! segment reader.

use serde::{Deserialize, Serialize};

/// A single key-value record as stored in a segment file.
///
/// Segments hold one JSON-encoded `Entry` per line, e.g.
/// `{"key":"a","value":"1"}`. Keys are opaque; equality is exact-match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    /// Create a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
