//! Pixvault Processing Library
//!
//! The upload pipeline core: the pure thumbnail transform and the coordinator
//! that runs the two object-store uploads concurrently and correlates their
//! results.

pub mod coordinator;
pub mod thumbnail;

pub use coordinator::UploadCoordinator;
pub use thumbnail::Thumbnailer;
