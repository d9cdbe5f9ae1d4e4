//! Error types for the ingestion crate.

use ndfd_common::{ArchiveError, UnrecognizedGridError};
use thiserror::Error;

/// Errors that can occur while ingesting a single forecast record.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    UnrecognizedGrid(#[from] UnrecognizedGridError),

    #[error("Upstream decoder rejected archive member: {0}")]
    DecodeRejected(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl From<ArchiveError> for IngestError {
    fn from(err: ArchiveError) -> Self {
        // Everything the store layer reports is fatal for the record being
        // processed, including undecodable stored metadata or payloads.
        IngestError::Storage(err.to_string())
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
