//! Repository implementations for database operations.

pub mod file;

pub use file::{FileRepository, FileStore};
