//! Deadline-bounded upload client.
//!
//! `upload` is the boundary the coordinator dispatches through: it always
//! produces exactly one `UploadOutcome` per task, whether the put succeeds,
//! fails, or runs past its deadline. Errors never propagate past this
//! function.

use crate::keys;
use crate::traits::{Storage, StorageError};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

/// Identifies which logical branch of the dual upload a task belongs to.
///
/// Outcomes are correlated back to their task by this tag, never by
/// inspecting the returned URI: generated keys can be substrings of one
/// another (`..._a.png` vs `..._compressed_a.png`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTag {
    Original,
    Derivative,
}

/// One upload attempt: a payload bound to an object key and content type.
///
/// Immutable once constructed; consumed by exactly one `upload` call.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub tag: UploadTag,
    pub object_key: String,
    pub content_type: String,
    pub payload: Bytes,
}

impl UploadTask {
    /// Task for the original upload: key `uploads/{nanos}_{filename}`.
    pub fn original(filename: &str, content_type: &str, payload: Bytes) -> Self {
        UploadTask {
            tag: UploadTag::Original,
            object_key: keys::object_key(filename),
            content_type: content_type.to_string(),
            payload,
        }
    }

    /// Task for the thumbnail derivative: key
    /// `uploads/{nanos}_compressed_{filename}`.
    pub fn derivative(filename: &str, content_type: &str, payload: Bytes) -> Self {
        UploadTask {
            tag: UploadTag::Derivative,
            object_key: keys::object_key(&keys::derivative_filename(filename)),
            content_type: content_type.to_string(),
            payload,
        }
    }

    /// Task with an explicit key. Used where the key is already known,
    /// e.g. in tests that pin the timestamp component.
    pub fn with_key(tag: UploadTag, object_key: &str, content_type: &str, payload: Bytes) -> Self {
        UploadTask {
            tag,
            object_key: object_key.to_string(),
            content_type: content_type.to_string(),
            payload,
        }
    }
}

/// Result of one upload attempt, tagged with its originating branch.
#[derive(Debug)]
pub struct UploadOutcome {
    pub tag: UploadTag,
    pub result: Result<String, StorageError>,
}

/// Upload one task with its own deadline, measured from this call.
///
/// Exceeding the deadline drops the in-flight put (cancelling the network
/// operation) and reports `DeadlineExceeded` for this tag only; a sibling
/// upload running concurrently is unaffected. A backend that reports success
/// with an empty URI is treated as a failure so the coordinator never
/// persists a blank location.
pub async fn upload(store: Arc<dyn Storage>, task: UploadTask, deadline: Duration) -> UploadOutcome {
    let UploadTask {
        tag,
        object_key,
        content_type,
        payload,
    } = task;

    let result = match tokio::time::timeout(
        deadline,
        store.put(&object_key, &content_type, payload),
    )
    .await
    {
        Ok(Ok(uri)) if uri.is_empty() => Err(StorageError::EmptyUri),
        Ok(Ok(uri)) => Ok(uri),
        Ok(Err(e)) => Err(e),
        Err(_elapsed) => Err(StorageError::DeadlineExceeded(deadline)),
    };

    if let Err(ref e) = result {
        tracing::warn!(tag = ?tag, key = %object_key, error = %e, "upload attempt failed");
    }

    UploadOutcome { tag, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StorageResult;
    use async_trait::async_trait;

    struct SlowStore {
        delay: Duration,
    }

    #[async_trait]
    impl Storage for SlowStore {
        async fn put(&self, key: &str, _ct: &str, _payload: Bytes) -> StorageResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok(format!("https://store.example/{}", key))
        }
    }

    struct EmptyUriStore;

    #[async_trait]
    impl Storage for EmptyUriStore {
        async fn put(&self, _key: &str, _ct: &str, _payload: Bytes) -> StorageResult<String> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn upload_within_deadline_succeeds() {
        let store = Arc::new(SlowStore {
            delay: Duration::from_millis(10),
        });
        let task = UploadTask::original("a.png", "image/png", Bytes::from_static(b"png"));
        let outcome = upload(store, task, Duration::from_secs(1)).await;
        assert_eq!(outcome.tag, UploadTag::Original);
        let uri = outcome.result.unwrap();
        assert!(uri.contains("_a.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn upload_past_deadline_reports_deadline_exceeded() {
        let store = Arc::new(SlowStore {
            delay: Duration::from_secs(60),
        });
        let task = UploadTask::derivative("a.png", "image/png", Bytes::from_static(b"png"));
        let outcome = upload(store, task, Duration::from_secs(10)).await;
        assert_eq!(outcome.tag, UploadTag::Derivative);
        assert!(matches!(
            outcome.result,
            Err(StorageError::DeadlineExceeded(_))
        ));
    }

    #[tokio::test]
    async fn empty_uri_is_a_failure() {
        let store = Arc::new(EmptyUriStore);
        let task = UploadTask::original("a.png", "image/png", Bytes::from_static(b"png"));
        let outcome = upload(store, task, Duration::from_secs(1)).await;
        assert!(matches!(outcome.result, Err(StorageError::EmptyUri)));
    }
}
