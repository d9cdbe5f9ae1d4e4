//! Common types shared across the NDFD archive workspace.

pub mod error;
pub mod grid;
pub mod record;

pub use error::{ArchiveError, ArchiveResult};
pub use grid::{GridSize, UnrecognizedGridError};
pub use record::ForecastRecord;
