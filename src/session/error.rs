//! Persistent storage error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing persistent storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Key contains characters that cannot be used as a record name
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Failed to read a stored record
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a stored record
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to delete a stored record
    #[error("Failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the storage directory
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to encode a record
    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    /// Storage backend is unusable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
