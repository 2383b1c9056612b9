//! Pixvault API
//!
//! HTTP surface for the upload pipeline: multipart extraction, static
//! validation, the JWT auth collaborator, and response shaping. The pipeline
//! itself (transform, dual upload, persist) lives in `pixvault-processing`,
//! `pixvault-storage`, and `pixvault-db`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod validation;
