//! Strata - Engine Configuration
//! Defines tunable parameters for the storage engine and server.

use std::path::PathBuf;

/// Configuration for the Strata storage engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all data files (manifest, segments).
    pub data_dir: PathBuf,

    /// Number of memtable entries that triggers a flush to a new segment.
    pub memtable_flush_threshold: usize,

    /// Address the HTTP server binds to.
    pub listen_addr: String,
}

/// Default flush trigger: entries held in the memtable before a flush.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 2000;

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            memtable_flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with a custom data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the memtable flush threshold (entry count).
    pub fn with_flush_threshold(mut self, threshold: usize) -> Self {
        self.memtable_flush_threshold = threshold;
        self
    }

    /// Set the HTTP listen address.
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }
}
