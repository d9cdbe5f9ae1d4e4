//! Conflict resolution between an incoming record and the stored slot.

use tracing::warn;

use ndfd_common::ForecastRecord;

use crate::metadata::SlotMetadata;

/// Outcome of conflict resolution for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Persist the incoming record, overwriting any stored slot.
    Write,
    /// Keep the stored slot, drop the incoming record.
    Skip,
}

/// Decide whether an incoming record replaces the stored one for its slot.
///
/// Last-writer-wins by `forecast_time`: an empty slot is always written; an
/// occupied slot is replaced only by a strictly later forecast time, so
/// re-ingesting the same record is a no-op. NDFD issues short-range updates
/// on a cadence that is monotonic with proximity to the valid hour, which is
/// why "latest forecast_time" realizes the intent of keeping the forecast
/// issued closest to the valid time without ever computing that distance.
/// Keep the literal comparison; downstream consumers depend on it.
pub fn resolve_conflict(existing: Option<&SlotMetadata>, incoming: &ForecastRecord) -> Decision {
    match existing {
        None => Decision::Write,
        Some(stored) if incoming.forecast_time > stored.forecast_date => Decision::Write,
        Some(_) => Decision::Skip,
    }
}

/// Log a consistency warning when the grid geometry shrank for a grid-size
/// id that already holds data.
///
/// With one object per slot there is no shared geometry artifact to
/// corrupt, so drift is survivable and reported rather than fatal.
pub fn check_geometry_drift(existing: &SlotMetadata, incoming: &ForecastRecord) {
    if let Some(stored_columns) = detect_geometry_drift(existing, incoming) {
        warn!(
            stored_columns = stored_columns,
            incoming_columns = incoming.grid_dimension,
            grid_size = %existing.grid_size,
            "Grid dimension shrank since last write; upstream grid may have been redefined"
        );
    }
}

/// Returns the stored column count when the incoming grid is narrower than
/// what the slot was written with. Slots archived before column counts were
/// recorded report no drift.
fn detect_geometry_drift(existing: &SlotMetadata, incoming: &ForecastRecord) -> Option<u32> {
    let stored_columns = existing.grid_columns()?;
    (incoming.grid_dimension < stored_columns).then_some(stored_columns)
}
