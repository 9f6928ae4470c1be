use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::UPLOADS_PREFIX;

/// Request for a presigned upload URL
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Original filename, kept verbatim in the object key
    #[serde(default)]
    pub file_name: String,
    /// MIME type the client will send with the PUT
    #[serde(default)]
    pub content_type: String,
}

/// Presigned PUT URL and the key it writes to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub upload_url: String,
    pub key: String,
}

/// Object key for a new upload: `uploads/<unix-seconds>-<fileName>`.
pub fn upload_key(timestamp: i64, file_name: &str) -> String {
    format!("{}{}-{}", UPLOADS_PREFIX, timestamp, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_format() {
        assert_eq!(
            upload_key(1718000000, "IMG_0001.jpg"),
            "uploads/1718000000-IMG_0001.jpg"
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: UploadRequest = serde_json::from_str("{}").unwrap();
        assert!(request.file_name.is_empty());
        assert!(request.content_type.is_empty());
    }

    #[test]
    fn test_response_field_names() {
        let response = UploadResponse {
            upload_url: "https://example.com/put".to_string(),
            key: "uploads/1-a.jpg".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["uploadUrl"], "https://example.com/put");
        assert_eq!(value["key"], "uploads/1-a.jpg");
    }
}
