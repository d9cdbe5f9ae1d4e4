//! End-to-end tests for the deduplication and archival-write pipeline.

use std::sync::Arc;

use ingestion::{BatchDriver, IngestError, SlotKey, SlotMetadata, SourceRecord};
use storage::{decode_array, MemoryObjectStore, ObjectStore};
use test_utils::{constant_grid, record_2_5km, record_with_dimension, utc, FailingStore};

fn members(records: Vec<ndfd_common::ForecastRecord>) -> Vec<SourceRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| SourceRecord::decoded(format!("member-{}", i), r))
        .collect()
}

async fn stored_metadata(store: &MemoryObjectStore, key: &str) -> SlotMetadata {
    SlotMetadata::from_slice(&store.get(key).await.unwrap()).unwrap()
}

// ============================================================================
// Single-record ingestion
// ============================================================================

#[tokio::test]
async fn test_single_record_writes_one_slot() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let record = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 7.0);
    let slot = SlotKey::for_record(&record).unwrap();
    let report = driver.ingest_batch(members(vec![record]).into_iter()).await;

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 0);
    assert!(report.failed.is_empty());
    assert!(driver.writer().slot_exists(&slot).await.unwrap());

    assert_eq!(
        store.keys().await,
        vec![
            "ndfd_data/YE/2.5/2019/1/1/3.data".to_string(),
            "ndfd_data/YE/2.5/2019/1/1/3.meta".to_string(),
        ]
    );

    let payload = decode_array(&store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap()).unwrap();
    assert_eq!(payload, constant_grid(3, 4, 7.0));
}

#[tokio::test]
async fn test_earlier_forecast_does_not_replace() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let first = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    driver.ingest_batch(members(vec![first]).into_iter()).await;

    // Earlier issuance for the same slot
    let stale = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 1, 30), 2.0);
    let report = driver.ingest_batch(members(vec![stale]).into_iter()).await;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.written, 0);

    let meta = stored_metadata(&store, "ndfd_data/YE/2.5/2019/1/1/3.meta").await;
    assert_eq!(meta.forecast_date, utc(2019, 1, 1, 2, 0));

    let payload = decode_array(&store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap()).unwrap();
    assert_eq!(payload, constant_grid(3, 4, 1.0));
}

#[tokio::test]
async fn test_reingesting_same_record_is_a_skip() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let record = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 5.0);
    let first = driver
        .ingest_batch(members(vec![record.clone()]).into_iter())
        .await;
    let second = driver.ingest_batch(members(vec![record]).into_iter()).await;

    assert_eq!(first.written, 1);
    assert_eq!(second.written, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(store.len().await, 2);
}

// ============================================================================
// Conflict resolution across arrival orders
// ============================================================================

#[tokio::test]
async fn test_latest_forecast_wins_in_order() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let older = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 1, 0), 1.0);
    let newer = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 2.0);
    let report = driver
        .ingest_batch(members(vec![older, newer]).into_iter())
        .await;

    assert_eq!(report.written, 2);

    let payload = decode_array(&store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap()).unwrap();
    assert_eq!(payload, constant_grid(3, 4, 2.0));
}

#[tokio::test]
async fn test_latest_forecast_wins_out_of_order() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let older = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 1, 0), 1.0);
    let newer = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 2.0);
    let report = driver
        .ingest_batch(members(vec![newer, older]).into_iter())
        .await;

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);

    let payload = decode_array(&store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap()).unwrap();
    assert_eq!(payload, constant_grid(3, 4, 2.0));
}

#[tokio::test]
async fn test_replacement_overwrites_whole_metadata_document() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let mut older = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 1, 0), 1.0);
    older
        .extra_attributes
        .insert("only_in_old".to_string(), "yes".to_string());
    let mut newer = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 2.0);
    newer
        .extra_attributes
        .insert("only_in_new".to_string(), "yes".to_string());

    driver
        .ingest_batch(members(vec![older, newer]).into_iter())
        .await;

    let meta = stored_metadata(&store, "ndfd_data/YE/2.5/2019/1/1/3.meta").await;
    assert_eq!(meta.extra.get("only_in_new").map(String::as_str), Some("yes"));
    assert!(meta.extra.get("only_in_old").is_none());
}

// ============================================================================
// Slot isolation
// ============================================================================

#[tokio::test]
async fn test_writing_one_slot_leaves_others_untouched() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let slot_a = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    driver.ingest_batch(members(vec![slot_a]).into_iter()).await;

    let meta_before = store.get("ndfd_data/YE/2.5/2019/1/1/3.meta").await.unwrap();
    let data_before = store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap();

    // Different hour and different measurement code
    let slot_b = record_2_5km("YE", utc(2019, 1, 1, 4, 0), utc(2019, 1, 1, 3, 0), 2.0);
    let slot_c = record_2_5km("YI", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 30), 3.0);
    driver
        .ingest_batch(members(vec![slot_b, slot_c]).into_iter())
        .await;

    assert_eq!(store.len().await, 6);
    assert_eq!(store.get("ndfd_data/YE/2.5/2019/1/1/3.meta").await.unwrap(), meta_before);
    assert_eq!(store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap(), data_before);
}

#[tokio::test]
async fn test_grid_sizes_are_distinct_slots() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let coarse = test_utils::record_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let fine = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 2.0);
    let report = driver
        .ingest_batch(members(vec![coarse, fine]).into_iter())
        .await;

    assert_eq!(report.written, 2);
    assert!(store.exists("ndfd_data/YE/5/2019/1/1/3.data").await.unwrap());
    assert!(store.exists("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap());
}

#[tokio::test]
async fn test_empty_payload_still_archives() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let record = test_utils::empty_payload_record("YE", utc(2019, 1, 1, 3, 0));
    let report = driver.ingest_batch(members(vec![record]).into_iter()).await;

    assert_eq!(report.written, 1);
    let payload = decode_array(&store.get("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap()).unwrap();
    assert_eq!(payload.dim(), (0, 0));
}

// ============================================================================
// Failure isolation
// ============================================================================

#[tokio::test]
async fn test_unrecognized_grid_fails_record_not_batch() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let bad = record_with_dimension(999, "YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let report = driver.ingest_batch(members(vec![bad]).into_iter()).await;

    assert_eq!(report.written, 0);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].record_id, "member-0");
    assert!(matches!(
        report.failed[0].error,
        IngestError::UnrecognizedGrid(_)
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_rejected_member_is_reported_and_batch_continues() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let good = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let source = vec![
        SourceRecord::rejected("YEUZ98_KWBN_000000000000", "no messages in file"),
        SourceRecord::decoded("YEUZ98_KWBN_201901010300", good),
    ];
    let report = driver.ingest_batch(source.into_iter()).await;

    assert_eq!(report.written, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].record_id, "YEUZ98_KWBN_000000000000");
    assert!(matches!(
        report.failed[0].error,
        IngestError::DecodeRejected(_)
    ));
}

#[tokio::test]
async fn test_mixed_batch_reports_all_outcomes() {
    let store = Arc::new(MemoryObjectStore::new());
    let driver = BatchDriver::new(store.clone());

    let write = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let skip = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 1, 0), 2.0);
    let fail = record_with_dimension(640, "YE", utc(2019, 1, 1, 4, 0), utc(2019, 1, 1, 3, 0), 3.0);
    let report = driver
        .ingest_batch(members(vec![write, skip, fail]).into_iter())
        .await;

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.total(), 3);
}

// ============================================================================
// Crash consistency
// ============================================================================

#[tokio::test]
async fn test_crash_between_phases_leaves_metadata_not_payload() {
    let memory = Arc::new(MemoryObjectStore::new());
    // First put (metadata) succeeds, second put (payload) fails.
    let store = Arc::new(FailingStore::after_puts(memory.clone(), 1));
    let driver = BatchDriver::new(store);

    let record = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let report = driver.ingest_batch(members(vec![record]).into_iter()).await;

    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].error, IngestError::Storage(_)));

    // Fresh metadata over a missing payload is the allowed partial state;
    // the reverse must never happen.
    assert!(memory.exists("ndfd_data/YE/2.5/2019/1/1/3.meta").await.unwrap());
    assert!(!memory.exists("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap());
}

#[tokio::test]
async fn test_interrupted_write_is_retried_by_next_run() {
    let memory = Arc::new(MemoryObjectStore::new());
    let record = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 4.0);

    // Run one crashes after the metadata phase.
    let crashing = BatchDriver::new(Arc::new(FailingStore::after_puts(memory.clone(), 1)));
    crashing
        .ingest_batch(members(vec![record.clone()]).into_iter())
        .await;

    // Run two sees the orphaned metadata as an empty slot and writes fully.
    let driver = BatchDriver::new(memory.clone());
    let report = driver.ingest_batch(members(vec![record]).into_iter()).await;

    assert_eq!(report.written, 1);
    assert!(memory.exists("ndfd_data/YE/2.5/2019/1/1/3.data").await.unwrap());
}

#[tokio::test]
async fn test_storage_outage_fails_records_but_finishes_batch() {
    let memory = Arc::new(MemoryObjectStore::new());
    // Nothing gets through.
    let driver = BatchDriver::new(Arc::new(FailingStore::after_puts(memory.clone(), 0)));

    let a = record_2_5km("YE", utc(2019, 1, 1, 3, 0), utc(2019, 1, 1, 2, 0), 1.0);
    let b = record_2_5km("YE", utc(2019, 1, 1, 4, 0), utc(2019, 1, 1, 3, 0), 2.0);
    let report = driver.ingest_batch(members(vec![a, b]).into_iter()).await;

    assert_eq!(report.written, 0);
    assert_eq!(report.failed.len(), 2);
    assert!(memory.is_empty().await);
}
