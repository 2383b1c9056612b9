//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. `AppError`
//! values convert into `HttpAppError` via `?` and render consistently:
//! status and body from the error's own metadata, plus a log line at the
//! level the error declares.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pixvault_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Needed because of Rust's orphan rules: we can't implement IntoResponse
/// (external trait) for AppError (type from pixvault-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<axum::extract::multipart::MultipartError> for HttpAppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        HttpAppError(AppError::Validation(format!(
            "invalid multipart request: {}",
            err.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        log_error(app_error);

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
