//! Batch driver: per-record pipeline with failure isolation.

use std::sync::Arc;
use tracing::{debug, info, warn};

use ndfd_common::ForecastRecord;
use storage::ObjectStore;

use crate::conflict::{check_geometry_drift, resolve_conflict, Decision};
use crate::error::{IngestError, Result};
use crate::slot::SlotKey;
use crate::source::{ArchiveSource, SourceRecord};
use crate::writer::ArchivalWriter;

/// A record the batch could not ingest.
#[derive(Debug)]
pub struct FailedRecord {
    /// Archive member name of the failed record.
    pub record_id: String,
    pub error: IngestError,
}

/// Outcome counts for one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Slots written (new or replaced).
    pub written: usize,
    /// Records dropped because the stored forecast was not older.
    pub skipped: usize,
    /// Records that failed, with the error that stopped each one.
    pub failed: Vec<FailedRecord>,
}

impl BatchReport {
    /// Total records processed.
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed.len()
    }
}

/// Drives decoded records through classify → address → conflict-check →
/// write, one record at a time.
///
/// The read-decide-write sequence per slot is not atomic against other
/// processes: run at most one ingestion process per (measurement_code,
/// grid_size) partition at a time. That is an operational requirement on
/// the caller, not something this driver enforces.
pub struct BatchDriver {
    writer: ArchivalWriter,
}

impl BatchDriver {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            writer: ArchivalWriter::new(store),
        }
    }

    /// Ingest every record the source yields, in source order.
    ///
    /// Per-record failures are recorded and the batch keeps going; nothing
    /// propagates out of this call.
    pub async fn ingest_batch<S: ArchiveSource>(&self, source: S) -> BatchReport {
        let mut report = BatchReport::default();

        for SourceRecord { id, decoded } in source {
            let outcome = match decoded {
                Ok(record) => self.ingest_record(&record).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(Decision::Write) => report.written += 1,
                Ok(Decision::Skip) => report.skipped += 1,
                Err(error) => {
                    warn!(record_id = %id, error = %error, "Record failed, continuing batch");
                    report.failed.push(FailedRecord {
                        record_id: id,
                        error,
                    });
                }
            }
        }

        info!(
            written = report.written,
            skipped = report.skipped,
            failed = report.failed.len(),
            "Batch complete"
        );
        report
    }

    async fn ingest_record(&self, record: &ForecastRecord) -> Result<Decision> {
        let slot = SlotKey::for_record(record)?;
        let existing = self.writer.read_metadata(&slot).await?;

        let decision = resolve_conflict(existing.as_ref(), record);
        match decision {
            Decision::Write => {
                if let Some(existing) = existing.as_ref() {
                    check_geometry_drift(existing, record);
                    info!(
                        key = %slot.base_key(),
                        stored_forecast = %existing.forecast_date,
                        incoming_forecast = %record.forecast_time,
                        "Replacing slot with later forecast"
                    );
                }
                self.writer.write_slot(&slot, record).await?;
            }
            Decision::Skip => {
                debug!(
                    key = %slot.base_key(),
                    incoming_forecast = %record.forecast_time,
                    "Not replacing; stored forecast is not older"
                );
            }
        }

        Ok(decision)
    }

    /// The writer this driver persists through.
    pub fn writer(&self) -> &ArchivalWriter {
        &self.writer
    }
}
