//! File record repository.

use async_trait::async_trait;
use pixvault_core::models::File;
use pixvault_core::AppError;
use sqlx::PgPool;

/// Persistence seam for file records.
///
/// The upload handler only ever creates records; a record is created exactly
/// once per successful dual upload, with both URIs already resolved and
/// non-empty. Implementations must return the row exactly as stored (no
/// normalization) and must not retry on failure.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn create(&self, original_uri: &str, compressed_uri: &str) -> Result<File, AppError>;
}

/// Postgres-backed file repository.
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        FileRepository { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create(&self, original_uri: &str, compressed_uri: &str) -> Result<File, AppError> {
        let file = sqlx::query_as::<_, File>(
            r#"
            INSERT INTO files (original_file_uri, compressed_file_uri)
            VALUES ($1, $2)
            RETURNING id, original_file_uri, compressed_file_uri
            "#,
        )
        .bind(original_uri)
        .bind(compressed_uri)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to insert file record");
            AppError::from(e)
        })?;

        tracing::info!(file_id = file.id, "file record created");
        Ok(file)
    }
}
