//! Strata - Error Types
//! Defines the error hierarchy for the storage engine.

use thiserror::Error;

/// Custom Result type for the Strata engine.
pub type Result<T> = std::result::Result<T, StrataError>;

/// Error types for the Strata storage engine.
///
/// `Corruption` and `Manifest` are storage-integrity errors: the engine
/// cannot recover from them locally and callers are expected to stop the
/// process rather than continue on possibly-wrong data.
#[derive(Error, Debug)]
pub enum StrataError {
    /// I/O errors from file operations (segments, manifest).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while encoding a segment record.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data corruption detected (undecodable segment record).
    #[error("Data corruption detected: {0}")]
    Corruption(String),

    /// Manifest is missing, unparsable, or out of sync with the data dir.
    #[error("Manifest error: {0}")]
    Manifest(String),
}
