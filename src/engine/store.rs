//! Strata - Shared Engine Handle
//! Cloneable, thread-safe handle around the storage engine.
//!
//! ## Concurrency Model
//! One engine-wide exclusive lock, held for the full duration of every
//! `get` or `put` including any disk I/O a flush performs. Operations are
//! therefore totally ordered: a `put` that completes before a `get` acquires
//! the lock is guaranteed visible to it. Reads share the lock too because
//! they reposition the shared manifest file handle.

use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::error::Result;

use super::metrics::EngineMetrics;
use super::StorageEngine;

/// Thread-safe handle to a Strata storage engine.
///
/// Clones share the same underlying engine; this is the surface handed to
/// request handlers.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<StorageEngine>>,
}

impl Store {
    /// Open or create an engine and wrap it for shared use.
    pub fn open(config: Config) -> Result<Self> {
        let engine = StorageEngine::open(config)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(engine)),
        })
    }

    /// Look up a key (exclusive lock).
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.lock().unwrap().get(key)
    }

    /// Insert a key-value pair (exclusive lock, may flush).
    pub fn put(&self, key: String, value: String) -> Result<()> {
        self.inner.lock().unwrap().put(key, value)
    }

    /// Number of entries currently buffered in the memtable.
    pub fn memtable_len(&self) -> usize {
        self.inner.lock().unwrap().memtable_len()
    }

    /// Run `f` against the engine metrics under the lock.
    pub fn with_metrics<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EngineMetrics) -> R,
    {
        let engine = self.inner.lock().unwrap();
        f(engine.metrics())
    }
}
