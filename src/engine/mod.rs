//! Strata - Storage Engine Module
//! Top-level module for the storage engine components.

pub mod manifest;
pub mod memtable;
pub mod metrics;
pub mod segment;
pub mod store;

use crate::config::Config;
use crate::error::Result;

use self::manifest::{segment_file_name, Manifest};
use self::memtable::MemTable;
use self::metrics::EngineMetrics;
use self::segment::SegmentWriter;

/// The core Strata storage engine.
/// Coordinates the memtable, segment files, and manifest to provide a
/// durable key-value store. All writes land in the memtable; once it holds
/// `memtable_flush_threshold` entries it is flushed wholesale to a new
/// immutable segment and the manifest records the next segment name.
#[derive(Debug)]
pub struct StorageEngine {
    /// In-memory buffer holding all writes since the last flush.
    memtable: MemTable,
    /// Append-only record of segment names in creation order.
    manifest: Manifest,
    /// Number of the segment the next flush will create.
    next_segment_number: u64,
    /// Operation counters.
    metrics: EngineMetrics,
    /// Engine configuration.
    config: Config,
}

impl StorageEngine {
    /// Open or create a Strata engine at the configured data directory.
    /// Recovery is driven entirely by the manifest: its last line names the
    /// segment the next flush will create.
    pub fn open(config: Config) -> Result<Self> {
        let (manifest, next_segment_number) = Manifest::initialize(&config.data_dir)?;

        log::info!(
            "Strata engine opened at {:?} (next segment number {})",
            config.data_dir,
            next_segment_number
        );

        Ok(Self {
            memtable: MemTable::new(),
            manifest,
            next_segment_number,
            metrics: EngineMetrics::new(),
            config,
        })
    }

    /// Look up a key. The memtable is consulted first; on a miss the
    /// manifest's segments are scanned newest-to-oldest, skipping the
    /// trailing reservation (that segment does not exist yet). The first
    /// match wins: a newer segment shadows any older value for the key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.memtable.get(key) {
            self.metrics.record_memtable_hit(value.len());
            return Ok(Some(value.clone()));
        }

        // Re-read the manifest so the scan reflects the latest flush.
        let mut names = self.manifest.segment_names()?;
        names.pop();

        for name in names.iter().rev() {
            let path = self.manifest.segment_path(name);
            if let Some(value) = segment::find_key(&path, key)? {
                self.metrics.record_segment_hit(value.len());
                return Ok(Some(value));
            }
        }

        self.metrics.record_miss();
        Ok(None)
    }

    /// Insert a key-value pair. Triggers a synchronous flush once the
    /// memtable reaches the configured threshold.
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        self.metrics.record_put(key.len(), value.len());
        self.memtable.insert(key, value);

        if self.memtable.len() >= self.config.memtable_flush_threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush the memtable to a new segment file.
    ///
    /// Ordering matters for crash safety: the segment is fully written and
    /// synced before the next reservation is appended to the manifest, so an
    /// unclean restart can never mistake a partial segment for a recorded
    /// one.
    fn flush(&mut self) -> Result<()> {
        let entry_count = self.memtable.len();
        let name = segment_file_name(self.next_segment_number);
        let path = self.manifest.segment_path(&name);

        let mut writer = SegmentWriter::create(&path)?;
        self.memtable.flush_and_clear(&mut writer)?;

        self.manifest
            .append_reservation(&segment_file_name(self.next_segment_number + 1))?;
        self.next_segment_number += 1;

        self.metrics.record_flush();
        log::info!("flushed {} entries to segment {}", entry_count, name);
        Ok(())
    }

    /// Number of entries currently buffered in the memtable.
    pub fn memtable_len(&self) -> usize {
        self.memtable.len()
    }

    /// Number of the segment the next flush will create.
    pub fn next_segment_number(&self) -> u64 {
        self.next_segment_number
    }

    /// Access the engine's operation counters.
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }
}
