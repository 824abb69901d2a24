//! Strata - MemTable (In-Memory Write Buffer)
//! The memtable is the sole target of writes. It holds exactly the writes
//! since the last flush and is reset to empty once a flush has been made
//! durable on disk.

use std::collections::HashMap;

use crate::error::Result;
use crate::types::Entry;

use super::segment::SegmentSink;

/// In-memory key-value buffer backed by a HashMap.
///
/// The map itself is unordered; ordering by key only matters at flush time,
/// when entries are drained into a sorted segment file.
#[derive(Debug)]
pub struct MemTable {
    entries: HashMap<String, String>,
}

impl MemTable {
    /// Create a new, empty MemTable.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of unique keys currently buffered.
    /// This is the flush trigger signal.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the MemTable is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a key-value pair. An existing value for the key is replaced.
    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// Get a value by key. Returns `None` if the key is not buffered.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    /// Write all buffered entries to `sink` in ascending key order, sync
    /// the sink, then reset the buffer to empty.
    ///
    /// If any write or the sync fails, the buffer is left untouched so no
    /// data is lost; the caller treats that as a fatal condition.
    pub fn flush_and_clear<S: SegmentSink>(&mut self, sink: &mut S) -> Result<()> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        for key in keys {
            let entry = Entry::new(key.clone(), self.entries[key].clone());
            sink.write_entry(&entry)?;
        }
        sink.sync()?;

        // Only reached once every record is durable.
        self.entries = HashMap::new();
        Ok(())
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}
