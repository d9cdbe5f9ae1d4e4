//! Canonical storage addressing for forecast slots.
//!
//! Every archived forecast lives at a slot addressed by measurement code,
//! grid size, and the *valid* time (the time the forecast is for), at
//! date + hour granularity. The key scheme is load-bearing for
//! compatibility with existing archives:
//!
//! ```text
//! ndfd_data/<code>/<grid_size>/<year>/<month>/<day>/<hour>.meta
//! ndfd_data/<code>/<grid_size>/<year>/<month>/<day>/<hour>.data
//! ```
//!
//! Numeric components are unpadded decimal (month `3`, not `03`).

use chrono::{Datelike, Timelike};

use ndfd_common::{ForecastRecord, GridSize, UnrecognizedGridError};

/// Root prefix for all archive objects.
pub const ARCHIVE_PREFIX: &str = "ndfd_data";

/// Unique storage address of one forecast slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub measurement_code: String,
    pub grid_size: GridSize,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl SlotKey {
    /// Resolve the slot a record belongs to.
    ///
    /// Date parts come from the record's valid time, never the forecast
    /// time. The only failure mode is an unclassifiable grid dimension.
    pub fn for_record(record: &ForecastRecord) -> Result<SlotKey, UnrecognizedGridError> {
        let grid_size = GridSize::classify(record.grid_dimension)?;
        let valid = record.valid_time;

        Ok(SlotKey {
            measurement_code: record.measurement_code.clone(),
            grid_size,
            year: valid.year(),
            month: valid.month(),
            day: valid.day(),
            hour: valid.hour(),
        })
    }

    /// Key prefix shared by both slot artifacts.
    pub fn base_key(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}/{}",
            ARCHIVE_PREFIX,
            self.measurement_code,
            self.grid_size.id(),
            self.year,
            self.month,
            self.day,
            self.hour
        )
    }

    /// Storage key of the metadata document.
    pub fn meta_key(&self) -> String {
        format!("{}.meta", self.base_key())
    }

    /// Storage key of the payload artifact.
    pub fn data_key(&self) -> String {
        format!("{}.data", self.base_key())
    }
}
