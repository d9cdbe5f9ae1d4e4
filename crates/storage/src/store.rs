//! The store interface consumed by the ingestion pipeline.

use async_trait::async_trait;
use bytes::Bytes;
use ndfd_common::ArchiveResult;

/// Minimal object-store surface the archive pipeline depends on.
///
/// Each operation is a single round trip to the backing store and fails
/// with `ArchiveError::StorageError` on transport or auth failure. There is
/// no compare-and-swap here: the pipeline's read-decide-write sequence over
/// these primitives is not atomic with respect to other writers (see the
/// `BatchDriver` docs for the single-writer-per-partition requirement).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> ArchiveResult<bool>;

    /// Read the full object at `key`.
    async fn get(&self, key: &str) -> ArchiveResult<Bytes>;

    /// Write `data` at `key`, overwriting any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> ArchiveResult<()>;
}
