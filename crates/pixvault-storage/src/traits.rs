//! Storage abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Upload deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("Empty URI returned by storage backend")]
    EmptyUri,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Remote object store with put-object semantics.
///
/// Implementations must be safe for concurrent use by simultaneous requests;
/// the upload coordinator issues two `put` calls in parallel against one
/// shared handle. On success, `put` returns the publicly resolvable URI of
/// the stored object, derived deterministically from the backend endpoint,
/// bucket, and key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `payload` under `key` with the given content type and return
    /// the public URI of the object.
    async fn put(&self, key: &str, content_type: &str, payload: Bytes) -> StorageResult<String>;
}
