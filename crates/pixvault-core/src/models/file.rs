//! Persisted file record and its API response shape.

use serde::Serialize;

/// A stored file: the original object plus its thumbnail derivative.
///
/// Created exactly once, after both uploads have succeeded, and never
/// updated or deleted by the upload pipeline. Both URIs are guaranteed
/// non-empty by the upload coordinator before a row is written.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct File {
    pub id: i64,
    pub original_file_uri: String,
    pub compressed_file_uri: String,
}

/// Response body for a successful upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: i64,
    pub file_uri: String,
    pub compressed_uri: String,
}

impl From<File> for UploadResponse {
    fn from(file: File) -> Self {
        UploadResponse {
            file_id: file.id,
            file_uri: file.original_file_uri,
            compressed_uri: file.compressed_file_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_serializes_camel_case() {
        let response = UploadResponse::from(File {
            id: 1,
            original_file_uri: "https://bucket.s3.amazonaws.com/uploads/1_a.png".to_string(),
            compressed_file_uri: "https://bucket.s3.amazonaws.com/uploads/2_compressed_a.png"
                .to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fileId"], 1);
        assert!(json["fileUri"].as_str().unwrap().contains("uploads/1_a.png"));
        assert!(json["compressedUri"]
            .as_str()
            .unwrap()
            .contains("compressed_a.png"));
    }
}
