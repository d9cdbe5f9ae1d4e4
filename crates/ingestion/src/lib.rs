//! Forecast deduplication and archival-write pipeline for NDFD grids.
//!
//! Takes decoded forecast records (possibly overlapping, possibly out of
//! order), picks the authoritative record for each (measurement, grid-size,
//! valid-time) slot, and persists it exactly once as a JSON metadata
//! document plus a NumPy payload under a fixed object-store key scheme.
//!
//! # Architecture
//!
//! Per record: grid classification → slot addressing → read of stored
//! metadata → conflict resolution (last writer wins by forecast time) →
//! two-phase write, metadata before payload. Tarball discovery, download,
//! extraction, and GRIB decoding all live upstream of this crate and hand
//! records in through [`ArchiveSource`].

pub mod batch;
pub mod conflict;
pub mod error;
pub mod metadata;
pub mod slot;
pub mod source;
pub mod writer;

// Re-exports
pub use batch::{BatchDriver, BatchReport, FailedRecord};
pub use conflict::{resolve_conflict, Decision};
pub use error::{IngestError, Result};
pub use metadata::{SlotMetadata, GRID_COLUMNS_ATTR};
pub use slot::{SlotKey, ARCHIVE_PREFIX};
pub use source::{ArchiveSource, SourceRecord};
pub use writer::ArchivalWriter;
