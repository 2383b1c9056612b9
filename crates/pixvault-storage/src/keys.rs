//! Storage key generation.
//!
//! Keys pair a nanosecond timestamp with the client-supplied filename under a
//! fixed `uploads/` prefix. The timestamp component keeps concurrent uploads
//! of identically named files from overwriting each other; it is not used for
//! result correlation (that is done by upload tag, see `client`).

use std::time::{SystemTime, UNIX_EPOCH};

/// Logical prefix under which all uploaded objects live.
pub const KEY_PREFIX: &str = "uploads";

/// Generate a collision-resistant object key: `uploads/{nanos}_{filename}`.
pub fn object_key(filename: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}/{}_{}", KEY_PREFIX, nanos, filename)
}

/// Filename for the thumbnail derivative of `filename`.
pub fn derivative_filename(filename: &str) -> String {
    format!("compressed_{}", filename)
}
