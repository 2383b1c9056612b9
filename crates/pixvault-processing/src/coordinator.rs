//! Dual-upload coordinator.
//!
//! Runs the original and derivative uploads concurrently and only reports
//! success when both branches resolved a non-empty URI. The two uploads are
//! independent remote calls, so running them in parallel bounds pipeline
//! latency by the slower branch instead of the sum.
//!
//! Each dispatched task owns its payload and reports back through its own
//! join handle; there is no shared mutable state between the branches.
//! Outcomes are matched to branches by `UploadTag`, never by URI content.

use pixvault_core::AppError;
use pixvault_storage::{upload, Storage, UploadOutcome, UploadTag, UploadTask};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

/// Coordinates the concurrent upload of an original file and its thumbnail
/// derivative against a shared storage handle.
#[derive(Clone)]
pub struct UploadCoordinator {
    store: Arc<dyn Storage>,
    deadline: Duration,
}

impl UploadCoordinator {
    /// `deadline` applies to each upload independently, measured from its
    /// own dispatch.
    pub fn new(store: Arc<dyn Storage>, deadline: Duration) -> Self {
        UploadCoordinator { store, deadline }
    }

    /// Upload both tasks concurrently and return `(original_uri, derivative_uri)`.
    ///
    /// Fails as a whole if either branch errors, times out, panics, or
    /// resolves an empty URI. No partial commit: the caller never sees one
    /// URI without the other. A branch that did succeed before the other
    /// failed is left in storage for external cleanup.
    pub async fn coordinate(
        &self,
        original: UploadTask,
        derivative: UploadTask,
    ) -> Result<(String, String), AppError> {
        if original.tag != UploadTag::Original || derivative.tag != UploadTag::Derivative {
            return Err(AppError::Internal(
                "upload tasks passed to coordinator with mismatched tags".to_string(),
            ));
        }

        tracing::debug!(
            original_key = %original.object_key,
            derivative_key = %derivative.object_key,
            deadline_secs = self.deadline.as_secs_f64(),
            "dispatching upload branches"
        );

        // Both payloads are fully in memory by now; neither branch starts
        // before the derivative bytes exist.
        let original_handle = self.dispatch(original);
        let derivative_handle = self.dispatch(derivative);

        // The single synchronization point: wait for exactly two outcomes,
        // in whatever order they complete.
        let (first, second) = tokio::join!(original_handle, derivative_handle);

        let mut original_uri = None;
        let mut derivative_uri = None;
        for outcome in [joined(first)?, joined(second)?] {
            let UploadOutcome { tag, result } = outcome;
            let uri = result
                .map_err(|e| AppError::UploadFailed(format!("{:?} upload: {}", tag, e)))?;
            match tag {
                UploadTag::Original => original_uri = Some(uri),
                UploadTag::Derivative => derivative_uri = Some(uri),
            }
        }

        match (original_uri, derivative_uri) {
            (Some(original), Some(derivative)) => Ok((original, derivative)),
            // Unreachable with distinct input tags; kept as a hard failure
            // rather than a panic.
            _ => Err(AppError::UploadFailed(
                "missing outcome for an upload branch".to_string(),
            )),
        }
    }

    fn dispatch(&self, task: UploadTask) -> JoinHandle<UploadOutcome> {
        let store = Arc::clone(&self.store);
        let deadline = self.deadline;
        tokio::spawn(async move { upload(store, task, deadline).await })
    }
}

fn joined(result: Result<UploadOutcome, JoinError>) -> Result<UploadOutcome, AppError> {
    result.map_err(|e| AppError::UploadFailed(format!("upload task aborted: {}", e)))
}
