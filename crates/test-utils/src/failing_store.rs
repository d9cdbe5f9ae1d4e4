//! Fault-injecting object store wrapper.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndfd_common::{ArchiveError, ArchiveResult};
use storage::ObjectStore;

/// Wraps a store and fails every `put` after the first `n` have succeeded.
///
/// Simulates a crash or outage partway through a multi-phase write:
/// `FailingStore::after_puts(inner, 1)` lets the metadata phase through and
/// kills the payload phase.
pub struct FailingStore {
    inner: Arc<dyn ObjectStore>,
    puts_remaining: AtomicUsize,
}

impl FailingStore {
    pub fn after_puts(inner: Arc<dyn ObjectStore>, n: usize) -> Self {
        Self {
            inner,
            puts_remaining: AtomicUsize::new(n),
        }
    }
}

#[async_trait]
impl ObjectStore for FailingStore {
    async fn exists(&self, key: &str) -> ArchiveResult<bool> {
        self.inner.exists(key).await
    }

    async fn get(&self, key: &str) -> ArchiveResult<Bytes> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> ArchiveResult<()> {
        let remaining = self.puts_remaining.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |n| n.checked_sub(1),
        );

        match remaining {
            Ok(_) => self.inner.put(key, data, content_type).await,
            Err(_) => Err(ArchiveError::StorageError(format!(
                "injected put failure for {}",
                key
            ))),
        }
    }
}
