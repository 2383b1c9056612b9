//! Upload coordinator behavior against a mock object store with injected
//! latency and failures.

use async_trait::async_trait;
use bytes::Bytes;
use pixvault_core::AppError;
use pixvault_processing::UploadCoordinator;
use pixvault_storage::{Storage, StorageError, StorageResult, UploadTag, UploadTask};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock store: per-key injected latency and failures, records completed puts.
#[derive(Default)]
struct MockStore {
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
    completed: Mutex<Vec<String>>,
}

impl MockStore {
    fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    fn with_failure(mut self, key: &str, message: &str) -> Self {
        self.failures.insert(key.to_string(), message.to_string());
        self
    }

    fn completed_keys(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStore {
    async fn put(&self, key: &str, _content_type: &str, _payload: Bytes) -> StorageResult<String> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(key) {
            return Err(StorageError::UploadFailed(message.clone()));
        }
        self.completed.lock().unwrap().push(key.to_string());
        Ok(format!("https://pics.s3.us-east-1.amazonaws.com/{}", key))
    }
}

fn task(tag: UploadTag, key: &str) -> UploadTask {
    UploadTask::with_key(tag, key, "image/png", Bytes::from_static(b"payload"))
}

#[tokio::test]
async fn both_branches_succeeding_returns_original_first() {
    let store = Arc::new(MockStore::default());
    let coordinator = UploadCoordinator::new(store, Duration::from_secs(10));

    let (original, derivative) = coordinator
        .coordinate(
            task(UploadTag::Original, "uploads/1_photo.jpg"),
            task(UploadTag::Derivative, "uploads/2_compressed_photo.jpg"),
        )
        .await
        .unwrap();

    assert!(original.ends_with("uploads/1_photo.jpg"));
    assert!(derivative.ends_with("uploads/2_compressed_photo.jpg"));
    assert_ne!(original, derivative);
    assert!(!original.is_empty() && !derivative.is_empty());
}

#[tokio::test]
async fn correlation_is_by_tag_even_when_keys_are_substrings() {
    // The derivative key contains "_a.png", the tail of the original key.
    // Content-based matching would misassign these; tags must not.
    let store = Arc::new(
        MockStore::default()
            // Derivative finishes first to rule out completion-order luck
            .with_delay("uploads/1_a.png", Duration::from_millis(50)),
    );
    let coordinator = UploadCoordinator::new(store, Duration::from_secs(10));

    let (original, derivative) = coordinator
        .coordinate(
            task(UploadTag::Original, "uploads/1_a.png"),
            task(UploadTag::Derivative, "uploads/1_compressed_a.png"),
        )
        .await
        .unwrap();

    assert!(original.ends_with("/uploads/1_a.png"));
    assert!(derivative.ends_with("/uploads/1_compressed_a.png"));
}

#[tokio::test]
async fn derivative_failure_is_not_masked_by_original_success() {
    let store = Arc::new(
        MockStore::default().with_failure("uploads/2_compressed_a.png", "connection reset"),
    );
    let coordinator = UploadCoordinator::new(Arc::clone(&store) as Arc<dyn Storage>, Duration::from_secs(10));

    let err = coordinator
        .coordinate(
            task(UploadTag::Original, "uploads/1_a.png"),
            task(UploadTag::Derivative, "uploads/2_compressed_a.png"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UploadFailed(_)));
    // The original branch did complete; it is simply orphaned in storage.
    assert_eq!(store.completed_keys(), vec!["uploads/1_a.png".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn uploads_run_concurrently_not_serialized() {
    let store = Arc::new(
        MockStore::default()
            .with_delay("uploads/1_a.png", Duration::from_millis(150))
            .with_delay("uploads/2_compressed_a.png", Duration::from_millis(150)),
    );
    let coordinator = UploadCoordinator::new(store, Duration::from_secs(10));

    let started = tokio::time::Instant::now();
    coordinator
        .coordinate(
            task(UploadTag::Original, "uploads/1_a.png"),
            task(UploadTag::Derivative, "uploads/2_compressed_a.png"),
        )
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // max(L1, L2), not L1 + L2
    assert!(elapsed >= Duration::from_millis(150), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(250), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn timed_out_branch_fails_without_blocking_the_sibling() {
    let deadline = Duration::from_secs(10);
    let store = Arc::new(
        MockStore::default()
            .with_delay("uploads/1_a.png", Duration::from_millis(50))
            .with_delay("uploads/2_compressed_a.png", Duration::from_secs(60)),
    );
    let coordinator =
        UploadCoordinator::new(Arc::clone(&store) as Arc<dyn Storage>, deadline);

    let started = tokio::time::Instant::now();
    let err = coordinator
        .coordinate(
            task(UploadTag::Original, "uploads/1_a.png"),
            task(UploadTag::Derivative, "uploads/2_compressed_a.png"),
        )
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, AppError::UploadFailed(_)));
    // The whole operation resolves within a bounded margin of the deadline,
    // not after the slow branch's full 60s.
    assert!(elapsed >= deadline, "elapsed {:?}", elapsed);
    assert!(elapsed < deadline + Duration::from_secs(1), "elapsed {:?}", elapsed);
    // The fast sibling made independent progress.
    assert_eq!(store.completed_keys(), vec!["uploads/1_a.png".to_string()]);
}

#[tokio::test]
async fn mismatched_tags_are_rejected() {
    let store = Arc::new(MockStore::default());
    let coordinator = UploadCoordinator::new(store, Duration::from_secs(10));

    let err = coordinator
        .coordinate(
            task(UploadTag::Derivative, "uploads/1_compressed_a.png"),
            task(UploadTag::Original, "uploads/1_a.png"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
}
