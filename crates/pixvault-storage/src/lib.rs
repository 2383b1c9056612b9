//! Pixvault Storage Library
//!
//! Storage abstraction and the S3 implementation, plus the deadline-bounded
//! upload client used by the dual-upload coordinator.
//!
//! # Storage key format
//!
//! Every object lands under a fixed `uploads/` prefix with a
//! nanosecond-timestamp component so concurrent uploads of identically named
//! files cannot collide: `uploads/{nanos}_{filename}`. Thumbnail derivatives
//! use the same scheme with the filename prefixed `compressed_`. Key
//! generation is centralized in the `keys` module.

pub mod client;
pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use client::{upload, UploadOutcome, UploadTag, UploadTask};
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
