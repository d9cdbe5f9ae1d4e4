//! The per-slot metadata document.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use ndfd_common::{ArchiveError, ArchiveResult, ForecastRecord, GridSize, UnrecognizedGridError};

/// Auxiliary attribute recording the column count of the archived grid.
///
/// Lets a later run detect upstream geometry drift for a grid-size id
/// without fetching the payload.
pub const GRID_COLUMNS_ATTR: &str = "grid_columns";

/// JSON document stored next to each payload artifact.
///
/// `valid_date` and `forecast_date` serialize as ISO-8601 strings;
/// auxiliary attributes are flattened into the same JSON object. On
/// replacement the whole document is overwritten, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMetadata {
    /// When the forecast is _for_.
    pub valid_date: DateTime<Utc>,
    /// When the forecast was _made_. This is the field conflict resolution
    /// compares.
    pub forecast_date: DateTime<Utc>,
    /// Grid-size identifier ("5" or "2.5").
    pub grid_size: GridSize,
    /// String-valued auxiliary attributes from the decoded message.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SlotMetadata {
    /// Build the document for a record.
    pub fn for_record(record: &ForecastRecord) -> Result<SlotMetadata, UnrecognizedGridError> {
        let mut extra = record.extra_attributes.clone();
        extra.insert(GRID_COLUMNS_ATTR.to_string(), record.grid_dimension.to_string());

        Ok(SlotMetadata {
            valid_date: record.valid_time,
            forecast_date: record.forecast_time,
            grid_size: GridSize::classify(record.grid_dimension)?,
            extra,
        })
    }

    /// Column count recorded at write time, if parseable.
    pub fn grid_columns(&self) -> Option<u32> {
        self.extra.get(GRID_COLUMNS_ATTR)?.parse().ok()
    }

    /// Serialize to the JSON bytes stored at the `.meta` key.
    pub fn to_bytes(&self) -> ArchiveResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Parse the JSON bytes stored at the `.meta` key.
    pub fn from_slice(bytes: &[u8]) -> ArchiveResult<SlotMetadata> {
        serde_json::from_slice(bytes)
            .map_err(|e| ArchiveError::MetadataError(format!("Malformed slot metadata: {}", e)))
    }
}
