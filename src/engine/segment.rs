//! Strata - Segment Files (Sorted String Tables)
//! Immutable on-disk files produced by memtable flushes. Each segment holds
//! one JSON record per line, sorted ascending by key, and is never modified
//! after creation.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{Result, StrataError};
use crate::types::Entry;

/// Sink for a memtable flush: accepts records in ascending key order and a
/// final durability sync. `SegmentWriter` is the production implementation;
/// the seam exists so flush failure handling can be exercised without a
/// real disk fault.
pub trait SegmentSink {
    /// Append one record.
    fn write_entry(&mut self, entry: &Entry) -> Result<()>;

    /// Make everything written so far durable.
    fn sync(&mut self) -> Result<()>;
}

/// Writer for a new segment file.
///
/// The file must not already exist: a segment number is used exactly once,
/// so an existing file at the target path means the manifest and the data
/// directory are out of sync.
pub struct SegmentWriter {
    file: File,
}

impl SegmentWriter {
    /// Create the segment file at `path`. Fails if the file exists.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(Self { file })
    }

    /// Append one record as a JSON line.
    pub fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }

    /// Sync the segment to disk. Must be called before the segment is
    /// recorded anywhere as complete.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl SegmentSink for SegmentWriter {
    fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        SegmentWriter::write_entry(self, entry)
    }

    fn sync(&mut self) -> Result<()> {
        SegmentWriter::sync(self)
    }
}

/// Scan the segment at `path` for `key`, first record to last, and return
/// the first exact match.
///
/// A segment that cannot be opened (named in the manifest but missing on
/// disk) is logged and treated as "key not found in this segment" so the
/// caller can continue to older segments. An undecodable record, on the
/// other hand, means the segment is corrupt and the error is unrecoverable.
pub fn find_key(path: &Path, key: &str) -> Result<Option<String>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            log::warn!("cannot open segment {}: {}", path.display(), err);
            return Ok(None);
        }
    };

    let reader = BufReader::new(file);
    for line in reader.lines() {
        let line = line?;
        let entry: Entry = serde_json::from_str(&line).map_err(|err| {
            StrataError::Corruption(format!(
                "undecodable record in segment {}: {}",
                path.display(),
                err
            ))
        })?;

        if entry.key == key {
            return Ok(Some(entry.value));
        }
    }

    Ok(None)
}

/// Read every record in a segment, in file order. Used by tests and
/// inspection tooling; the lookup path goes through `find_key`.
pub fn read_all(path: &Path) -> Result<Vec<Entry>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry: Entry = serde_json::from_str(&line).map_err(|err| {
            StrataError::Corruption(format!(
                "undecodable record in segment {}: {}",
                path.display(),
                err
            ))
        })?;
        entries.push(entry);
    }
    Ok(entries)
}
