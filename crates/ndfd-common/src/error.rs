//! Error types shared across the NDFD archive workspace.

use thiserror::Error;

/// Result type alias using ArchiveError.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Primary error type for archive storage operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid metadata document: {0}")]
    MetadataError(String),

    #[error("Invalid payload artifact: {0}")]
    PayloadError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

// Conversion from common error types
impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::MetadataError(format!("JSON error: {}", err))
    }
}
