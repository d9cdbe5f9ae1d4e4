//! Forecast-record fixtures.

use chrono::{DateTime, TimeZone, Utc};
use ndarray::Array2;
use ndfd_common::ForecastRecord;

use crate::generators::constant_grid;

/// Column counts of the two real NDFD grids, for building valid fixtures.
pub const DIM_5KM: u32 = 1073;
pub const DIM_2_5KM: u32 = 2145;

/// Shorthand UTC timestamp constructor.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// A well-formed 2.5 km record with a small marker payload.
///
/// `marker` fills the payload so tests can tell which record won a slot.
pub fn record_2_5km(
    measurement_code: &str,
    valid_time: DateTime<Utc>,
    forecast_time: DateTime<Utc>,
    marker: f32,
) -> ForecastRecord {
    record_with_dimension(DIM_2_5KM, measurement_code, valid_time, forecast_time, marker)
}

/// A well-formed 5 km record with a small marker payload.
pub fn record_5km(
    measurement_code: &str,
    valid_time: DateTime<Utc>,
    forecast_time: DateTime<Utc>,
    marker: f32,
) -> ForecastRecord {
    record_with_dimension(DIM_5KM, measurement_code, valid_time, forecast_time, marker)
}

/// A record with an arbitrary grid dimension (including invalid ones).
///
/// The payload stays small regardless of the claimed dimension; the
/// pipeline never checks payload shape against `grid_dimension`.
pub fn record_with_dimension(
    grid_dimension: u32,
    measurement_code: &str,
    valid_time: DateTime<Utc>,
    forecast_time: DateTime<Utc>,
    marker: f32,
) -> ForecastRecord {
    ForecastRecord::new(
        grid_dimension,
        valid_time,
        forecast_time,
        measurement_code,
        constant_grid(3, 4, marker),
    )
}

/// A record with an empty payload, for edge-case tests.
pub fn empty_payload_record(measurement_code: &str, valid_time: DateTime<Utc>) -> ForecastRecord {
    ForecastRecord::new(
        DIM_2_5KM,
        valid_time,
        valid_time,
        measurement_code,
        Array2::zeros((0, 0)),
    )
}
