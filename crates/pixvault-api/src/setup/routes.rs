//! Router assembly

use crate::auth::require_auth;
use crate::handlers::{file_upload::upload_file, health::healthz};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Build the application router around the given state.
///
/// Also used by the integration tests, which assemble the same router around
/// in-memory storage and a stub file store.
pub fn build_router(state: Arc<AppState>) -> Router {
    // The body limit is a transport guard against oversized requests; the
    // spec-level size check (with its client-readable message) happens in
    // validation, so leave generous headroom above the file size limit.
    let body_limit = state.max_file_size_bytes * 4 + 64 * 1024;

    Router::new()
        .route("/v1/file", post(upload_file))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_auth,
        ))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
