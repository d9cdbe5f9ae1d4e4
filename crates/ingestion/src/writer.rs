//! Durable two-phase slot writes.

use std::sync::Arc;
use tracing::{debug, info};

use ndfd_common::{ArchiveError, ArchiveResult, ForecastRecord};
use storage::{encode_array, ObjectStore};

use crate::metadata::SlotMetadata;
use crate::slot::SlotKey;

const META_CONTENT_TYPE: &str = "application/json";
const DATA_CONTENT_TYPE: &str = "application/octet-stream";

/// Writes winning records to the object store.
///
/// Composes the store's `exists`/`get`/`put` primitives into the slot
/// protocol. The read-then-write sequence is not atomic; see the
/// concurrency note on [`crate::BatchDriver`].
pub struct ArchivalWriter {
    store: Arc<dyn ObjectStore>,
}

impl ArchivalWriter {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Whether the slot holds an archived payload.
    ///
    /// Checks the `.data` artifact: a `.meta` document left behind by a
    /// crash between write phases does not count as an occupied slot, so a
    /// later run will rewrite it.
    pub async fn slot_exists(&self, slot: &SlotKey) -> ArchiveResult<bool> {
        self.store.exists(&slot.data_key()).await
    }

    /// Read the stored metadata for a slot, if the slot is occupied.
    pub async fn read_metadata(&self, slot: &SlotKey) -> ArchiveResult<Option<SlotMetadata>> {
        if !self.slot_exists(slot).await? {
            return Ok(None);
        }

        let bytes = self.store.get(&slot.meta_key()).await?;
        let metadata = SlotMetadata::from_slice(&bytes)?;
        debug!(key = %slot.meta_key(), forecast_date = %metadata.forecast_date, "Read slot metadata");

        Ok(Some(metadata))
    }

    /// Persist a record at its slot: metadata first, then payload.
    ///
    /// Strict phase ordering is the sole crash-consistency mechanism. A
    /// crash between phases leaves fresh metadata over a stale or missing
    /// payload, never a payload fresher than its metadata claims. Readers
    /// that trust the metadata stay safe; readers that trust payload
    /// existence alone do not.
    pub async fn write_slot(&self, slot: &SlotKey, record: &ForecastRecord) -> ArchiveResult<()> {
        let metadata = SlotMetadata::for_record(record)
            .map_err(|e| ArchiveError::InternalError(e.to_string()))?;

        self.store
            .put(&slot.meta_key(), metadata.to_bytes()?, META_CONTENT_TYPE)
            .await?;

        let payload = encode_array(&record.payload)?;
        self.store
            .put(&slot.data_key(), payload, DATA_CONTENT_TYPE)
            .await?;

        info!(key = %slot.data_key(), "Array saved");
        Ok(())
    }
}
