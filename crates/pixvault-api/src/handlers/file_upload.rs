//! File upload handler.
//!
//! The full pipeline for `POST /v1/file`: extract the multipart field,
//! validate it, derive the thumbnail, run the dual upload, persist the
//! record, shape the response. Every stage failure maps to exactly one
//! error; there is no partial-success response.

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::validation::validate_upload;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use pixvault_core::models::UploadResponse;
use pixvault_core::AppError;
use pixvault_storage::UploadTask;
use std::sync::Arc;

const FILE_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (filename, content_type, payload) = read_file_field(&mut multipart).await?;

    validate_upload(
        &filename,
        payload.len(),
        state.max_file_size_bytes,
        &state.allowed_extensions,
    )?;

    // Derivative first: an undecodable payload must abort before any upload
    // is dispatched.
    let thumbnail = state.thumbnailer.transform(&payload)?;

    tracing::debug!(
        filename = %filename,
        size_bytes = payload.len(),
        thumbnail_bytes = thumbnail.len(),
        "dispatching dual upload"
    );

    let original = UploadTask::original(&filename, &content_type, payload);
    let derivative = UploadTask::derivative(&filename, &content_type, thumbnail);

    let (original_uri, compressed_uri) = state.coordinator.coordinate(original, derivative).await?;

    let file = state
        .files
        .create(&original_uri, &compressed_uri)
        .await
        .map_err(|e| {
            // Both objects are already in storage; the failed insert leaves
            // them orphaned. Recorded here, cleaned up externally.
            tracing::error!(
                original_uri = %original_uri,
                compressed_uri = %compressed_uri,
                "file record insert failed after successful uploads; objects orphaned"
            );
            e
        })?;

    Ok(Json(UploadResponse::from(file)))
}

/// Pull the `file` field out of the multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, String, Bytes), HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::Validation("file name is required".to_string()))?;
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let payload = field.bytes().await?;

        return Ok((filename, content_type, payload));
    }

    Err(AppError::Validation("file is required".to_string()).into())
}
