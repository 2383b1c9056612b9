//! Error types module
//!
//! All errors in the upload pipeline are unified under the `AppError` enum.
//! Each variant maps to exactly one pipeline stage: validation at the HTTP
//! boundary, thumbnail derivation, the dual upload, and persistence. The
//! `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Thumbnail transform failed: {0}")]
    TransformFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Validation(_) => "Validation",
            AppError::TransformFailed(_) => "TransformFailed",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::Database(_)
            | AppError::TransformFailed(_)
            | AppError::UploadFailed(_)
            | AppError::Config(_)
            | AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "PERSISTENCE_FAILED",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::TransformFailed(_) => "TRANSFORM_FAILED",
            AppError::UploadFailed(_) => "UPLOAD_FAILED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Server-side failures never leak internals to the client
            AppError::Database(_) => "Create file failed".to_string(),
            AppError::TransformFailed(_) => "Failed to process image".to_string(),
            AppError::UploadFailed(_) => "Upload failed".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "Internal server error".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::Unauthorized(_) => LogLevel::Debug,
            AppError::TransformFailed(_) => LogLevel::Warn,
            AppError::Database(_)
            | AppError::UploadFailed(_)
            | AppError::Config(_)
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_client_error() {
        let err = AppError::Validation("file size exceeds 100KiB".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.client_message(), "file size exceeds 100KiB");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn upload_failure_maps_to_server_error() {
        let err = AppError::UploadFailed("deadline exceeded".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "UPLOAD_FAILED");
        // Internal detail stays out of the client message
        assert_eq!(err.client_message(), "Upload failed");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn persistence_failure_hides_details() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "PERSISTENCE_FAILED");
        assert_eq!(err.client_message(), "Create file failed");
    }
}
