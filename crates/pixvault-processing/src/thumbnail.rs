//! Thumbnail transform.
//!
//! Pure function over bytes: decode, resize to the configured target
//! dimensions, re-encode in the source format. No I/O, deterministic for a
//! given input and target size. Runs before any upload is dispatched; a
//! failure here aborts the pipeline so no partial upload can happen for a
//! file whose derivative could not be produced.

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use pixvault_core::AppError;
use std::io::Cursor;

/// Produces fixed-size thumbnail derivatives of encoded images.
#[derive(Debug, Clone, Copy)]
pub struct Thumbnailer {
    width: u32,
    height: u32,
}

impl Thumbnailer {
    pub fn new(width: u32, height: u32) -> Self {
        Thumbnailer { width, height }
    }

    /// Resize `original` to the target dimensions, keeping the source encoding.
    ///
    /// The input has already passed extension validation, but the payload may
    /// still be malformed; any decode or encode failure surfaces as
    /// `AppError::TransformFailed`.
    pub fn transform(&self, original: &[u8]) -> Result<Bytes, AppError> {
        let reader = ImageReader::new(Cursor::new(original))
            .with_guessed_format()
            .map_err(|e| AppError::TransformFailed(format!("unreadable image data: {}", e)))?;

        let format = reader.format().unwrap_or(ImageFormat::Jpeg);

        let img = reader
            .decode()
            .map_err(|e| AppError::TransformFailed(format!("failed to decode image: {}", e)))?;

        let resized = img.resize_exact(self.width, self.height, FilterType::Lanczos3);

        // JPEG has no alpha channel; flatten before encoding
        let resized = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
            _ => resized,
        };

        let mut buffer = Vec::with_capacity((self.width * self.height * 3) as usize);
        resized
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| AppError::TransformFailed(format!("failed to encode thumbnail: {}", e)))?;

        Ok(Bytes::from(buffer))
    }
}
