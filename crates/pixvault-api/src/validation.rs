//! Static upload validation.
//!
//! Runs before the transformer and the coordinator ever see the payload; a
//! rejected file costs no remote call.

use pixvault_core::AppError;

/// Validate the inbound file's size and extension.
///
/// The extension is taken case-insensitively from the final path segment
/// after the last `.`.
pub fn validate_upload(
    filename: &str,
    size: usize,
    max_size_bytes: usize,
    allowed_extensions: &[String],
) -> Result<(), AppError> {
    if size == 0 {
        return Err(AppError::Validation("file is empty".to_string()));
    }
    if size > max_size_bytes {
        return Err(AppError::Validation(format!(
            "file size exceeds {}KiB",
            max_size_bytes / 1024
        )));
    }

    // Everything after the last dot, so a bare dotfile name like ".png"
    // still has an extension.
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| AppError::Validation(format!("invalid filename: {}", filename)))?;

    if !allowed_extensions.iter().any(|e| e == &extension) {
        return Err(AppError::Validation(format!(
            "invalid file type; only {} allowed",
            allowed_extensions.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["jpeg".to_string(), "jpg".to_string(), "png".to_string()]
    }

    const MAX: usize = 100 * 1024;

    #[test]
    fn accepts_file_at_the_size_limit() {
        assert!(validate_upload("photo.jpg", MAX, MAX, &allowed()).is_ok());
    }

    #[test]
    fn rejects_file_over_the_size_limit() {
        let err = validate_upload("photo.jpg", 150 * 1024, MAX, &allowed()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("100KiB"));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(validate_upload("photo.jpg", 0, MAX, &allowed()).is_err());
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(validate_upload("PHOTO.PNG", 10, MAX, &allowed()).is_ok());
        assert!(validate_upload("shot.JpEg", 10, MAX, &allowed()).is_ok());
    }

    #[test]
    fn extension_comes_from_the_last_dot() {
        assert!(validate_upload("archive.tar.png", 10, MAX, &allowed()).is_ok());
        assert!(validate_upload("archive.png.exe", 10, MAX, &allowed()).is_err());
    }

    #[test]
    fn rejects_disallowed_extension_and_missing_extension() {
        assert!(validate_upload("document.pdf", 10, MAX, &allowed()).is_err());
        assert!(validate_upload("noextension", 10, MAX, &allowed()).is_err());
        assert!(validate_upload("trailingdot.", 10, MAX, &allowed()).is_err());
    }

    #[test]
    fn accepts_dotfile_name_with_allowed_extension() {
        assert!(validate_upload(".png", 10, MAX, &allowed()).is_ok());
        assert!(validate_upload(".pdf", 10, MAX, &allowed()).is_err());
    }
}
