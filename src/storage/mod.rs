//! Storage layer
//!
//! Thin filesystem access used for persisted settings. WASM builds have no
//! writable filesystem, so callers there keep data in memory instead.

pub mod local;

pub use local::LocalStorage;

use std::fmt;

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// File or directory not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
    /// Serialization/deserialization error
    SerdeError(String),
    /// Storage not available on this platform
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(f, "not found: {}", path),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
            StorageError::SerdeError(msg) => write!(f, "serialization error: {}", msg),
            StorageError::Unavailable => write!(f, "storage unavailable on this platform"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

impl From<ron::error::SpannedError> for StorageError {
    fn from(e: ron::error::SpannedError) -> Self {
        StorageError::SerdeError(e.to_string())
    }
}

impl From<ron::Error> for StorageError {
    fn from(e: ron::Error) -> Self {
        StorageError::SerdeError(e.to_string())
    }
}
