//! Strata - Engine Metrics & Observability
//! Atomic counters tracking engine operations in a lock-free, thread-safe
//! manner using `AtomicU64`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Atomic operation counters for the Strata engine.
///
/// All counters use `Ordering::Relaxed` since we only need eventual
/// consistency for observability, not synchronization.
#[derive(Debug)]
pub struct EngineMetrics {
    /// Total number of `put` operations.
    pub puts: AtomicU64,
    /// Total number of `get` operations.
    pub gets: AtomicU64,
    /// Gets answered from the memtable.
    pub memtable_hits: AtomicU64,
    /// Gets answered from a segment file.
    pub segment_hits: AtomicU64,
    /// Gets that found nothing anywhere.
    pub misses: AtomicU64,
    /// Total number of flush (memtable → segment) events.
    pub flushes: AtomicU64,
    /// Total bytes written (keys + values).
    pub bytes_written: AtomicU64,
    /// Total bytes read (values returned by get).
    pub bytes_read: AtomicU64,
    /// Timestamp when the engine was opened.
    engine_started: Instant,
}

impl EngineMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self {
            puts: AtomicU64::new(0),
            gets: AtomicU64::new(0),
            memtable_hits: AtomicU64::new(0),
            segment_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
            engine_started: Instant::now(),
        }
    }

    /// Record a put operation.
    pub fn record_put(&self, key_size: usize, value_size: usize) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add((key_size + value_size) as u64, Ordering::Relaxed);
    }

    /// Record a get served by the memtable.
    pub fn record_memtable_hit(&self, value_size: usize) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.memtable_hits.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(value_size as u64, Ordering::Relaxed);
    }

    /// Record a get served by a segment file.
    pub fn record_segment_hit(&self, value_size: usize) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.segment_hits.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(value_size as u64, Ordering::Relaxed);
    }

    /// Record a get that found nothing.
    pub fn record_miss(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a flush event.
    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get engine uptime in seconds.
    pub fn uptime_secs(&self) -> f64 {
        self.engine_started.elapsed().as_secs_f64()
    }

    /// Get total number of operations (puts + gets).
    pub fn total_ops(&self) -> u64 {
        self.puts.load(Ordering::Relaxed) + self.gets.load(Ordering::Relaxed)
    }

    /// Format metrics as a human-readable report.
    pub fn report(&self) -> String {
        format!(
            "\n═══ Strata Engine Metrics ═══\n\
             Operations:\n\
               puts:          {}\n\
               gets:          {}\n\
               flushes:       {}\n\
             Lookups:\n\
               memtable hits: {}\n\
               segment hits:  {}\n\
               misses:        {}\n\
             I/O:\n\
               written:       {} bytes\n\
               read:          {} bytes\n\
             Uptime: {:.2}s",
            self.puts.load(Ordering::Relaxed),
            self.gets.load(Ordering::Relaxed),
            self.flushes.load(Ordering::Relaxed),
            self.memtable_hits.load(Ordering::Relaxed),
            self.segment_hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.bytes_written.load(Ordering::Relaxed),
            self.bytes_read.load(Ordering::Relaxed),
            self.uptime_secs(),
        )
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
