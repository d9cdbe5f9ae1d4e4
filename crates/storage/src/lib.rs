//! Object storage layer for the NDFD archive.
//!
//! Provides the narrow store interface the ingestion pipeline writes
//! through (`exists`/`get`/`put`), an S3/MinIO-backed implementation, an
//! in-memory implementation for tests, and the NumPy `.npy` codec used for
//! payload artifacts.

pub mod memory;
pub mod npy;
pub mod s3;
pub mod store;

pub use memory::MemoryObjectStore;
pub use npy::{decode_array, encode_array};
pub use s3::{ObjectStorage, ObjectStorageConfig};
pub use store::ObjectStore;
