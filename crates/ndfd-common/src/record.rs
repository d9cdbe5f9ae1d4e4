//! In-memory representation of one decoded forecast message.

use chrono::{DateTime, Utc};
use ndarray::Array2;
use std::collections::BTreeMap;

/// One decoded forecast grid, as produced by an upstream GRIB decoder.
///
/// The payload is opaque to the pipeline beyond its shape; all routing is
/// driven by the scalar attributes.
#[derive(Debug, Clone)]
pub struct ForecastRecord {
    /// Number of columns in the decoded grid (GRIB `Nx`); drives grid-size
    /// classification.
    pub grid_dimension: u32,
    /// When the forecast applies (date + hour used for addressing).
    pub valid_time: DateTime<Utc>,
    /// When the forecast was issued. Assumed, never enforced, to be at or
    /// before `valid_time`.
    pub forecast_time: DateTime<Utc>,
    /// Two-letter WMO-style measurement code from the archive naming
    /// convention (e.g. "YE").
    pub measurement_code: String,
    /// Forecast grid values, row-major.
    pub payload: Array2<f32>,
    /// Auxiliary string-valued fields copied from the decoded message.
    pub extra_attributes: BTreeMap<String, String>,
}

impl ForecastRecord {
    /// Create a record with no auxiliary attributes.
    pub fn new(
        grid_dimension: u32,
        valid_time: DateTime<Utc>,
        forecast_time: DateTime<Utc>,
        measurement_code: impl Into<String>,
        payload: Array2<f32>,
    ) -> Self {
        Self {
            grid_dimension,
            valid_time,
            forecast_time,
            measurement_code: measurement_code.into(),
            payload,
            extra_attributes: BTreeMap::new(),
        }
    }
}
