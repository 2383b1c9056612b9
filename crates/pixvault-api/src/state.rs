//! Application state shared across handlers.

use crate::auth::JwtAuth;
use pixvault_db::FileStore;
use pixvault_processing::{Thumbnailer, UploadCoordinator};
use std::sync::Arc;

/// Everything a request needs, built once at startup.
///
/// The storage handle (inside the coordinator) and the file store are pooled
/// and safe for concurrent use by simultaneous requests; nothing here is
/// mutated after startup.
pub struct AppState {
    pub thumbnailer: Thumbnailer,
    pub coordinator: UploadCoordinator,
    pub files: Arc<dyn FileStore>,
    /// JWT validation collaborator; `None` leaves auth enforcement disabled.
    pub auth: Option<JwtAuth>,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
}
