//! Strata - Persistent Key-Value Store
//!
//! A minimal persistent key-value store exposed over an HTTP API.
//!
//! ## Architecture
//! - **MemTable**: in-memory write buffer, the sole target of writes
//! - **Segments**: immutable on-disk files, one JSON record per line,
//!   sorted ascending by key, produced by memtable flushes
//! - **Manifest**: append-only log of segment names; its last line reserves
//!   the name the next flush will use, driving both recovery and the
//!   newest-to-oldest lookup fallback
//! - **Storage Engine**: orchestrates the above behind a single exclusive
//!   lock; flushes synchronously once the memtable crosses its threshold
//!
//! ## Example
//! ```no_run
//! use strata::{config::Config, engine::StorageEngine};
//!
//! let config = Config::new("./data");
//! let mut engine = StorageEngine::open(config).unwrap();
//!
//! engine.put("key".to_string(), "value".to_string()).unwrap();
//! assert_eq!(engine.get("key").unwrap(), Some("value".to_string()));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod types;

pub use config::Config;
pub use engine::store::Store;
pub use engine::StorageEngine;
pub use error::{Result, StrataError};
