//! Object storage setup

use anyhow::{Context, Result};
use pixvault_core::Config;
use pixvault_storage::{S3Storage, Storage};
use std::sync::Arc;

/// Build the S3 storage handle from explicit configuration.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let s3 = config.s3();
    let storage = S3Storage::new(s3).context("Failed to build S3 storage client")?;

    tracing::info!(
        bucket = %s3.bucket,
        region = %s3.region,
        endpoint = s3.endpoint.as_deref().unwrap_or("aws"),
        "Object storage configured"
    );

    Ok(Arc::new(storage))
}
