use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One uploaded photo in the gallery listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Object key under `uploads/`
    pub key: String,
    /// Presigned GET URL, valid for one hour
    pub url: String,
    /// RFC 3339 timestamp of the last write
    pub last_modified: String,
    /// Object size in bytes
    pub size: i64,
}
