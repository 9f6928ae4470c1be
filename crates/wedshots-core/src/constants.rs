//! Constants shared by the API and the metadata worker.

/// Prefix under which every guest upload is stored.
pub const UPLOADS_PREFIX: &str = "uploads/";

/// Default DynamoDB table holding photo metadata.
pub const DEFAULT_METADATA_TABLE: &str = "wedding-photo-metadata";

/// Default Rekognition collection faces are indexed into.
pub const DEFAULT_FACE_COLLECTION_ID: &str = "wedding-faces";

/// Validity of a presigned upload (PUT) URL.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 15 * 60;

/// Validity of a presigned view (GET) URL handed out by the gallery.
pub const VIEW_URL_EXPIRY_SECS: u64 = 60 * 60;

/// Maximum number of faces indexed per photo.
pub const MAX_FACES_PER_PHOTO: i32 = 10;

/// Emotions at or below this confidence (0-100) are dropped.
pub const EMOTION_CONFIDENCE_THRESHOLD: f32 = 50.0;
