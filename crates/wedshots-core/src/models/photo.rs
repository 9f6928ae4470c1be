use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Face bounding box, as ratios of the overall image dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Estimated age range, in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FaceAgeRange {
    pub low: i64,
    pub high: i64,
}

/// A face indexed into the Rekognition collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetail {
    /// Identifier of the face in the collection
    pub face_id: String,
    /// Detection confidence (0-100)
    pub confidence: f64,
    #[serde(default)]
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<FaceAgeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smile: Option<bool>,
    /// Emotion labels detected with more than 50% confidence
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emotions: Vec<String>,
}

impl FaceDetail {
    pub fn new(face_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            face_id: face_id.into(),
            confidence,
            bounding_box: BoundingBox::default(),
            age_range: None,
            gender: None,
            smile: None,
            emotions: Vec::new(),
        }
    }
}

/// Metadata extracted from one uploaded photo.
///
/// Keyed by `photoId` (the object key) and `uploadedAt`. Optional fields are
/// left out of both the JSON and the DynamoDB item when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    /// Object key, `uploads/<timestamp>-<fileName>`
    pub photo_id: String,
    /// Unix seconds at which the metadata was extracted
    pub uploaded_at: i64,
    /// Capture timestamp, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// e.g. `"50.0mm"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    /// e.g. `"f/1.8"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_number: Option<String>,
    /// Exact fraction, e.g. `"1/500"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<i64>,
    /// Object size in bytes
    pub file_size: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces: Vec<FaceDetail>,
    #[serde(default)]
    pub face_count: i64,
}

impl PhotoMetadata {
    /// Empty record for an object; EXIF and face fields are filled in later.
    pub fn new(photo_id: impl Into<String>, uploaded_at: i64, file_size: i64) -> Self {
        Self {
            photo_id: photo_id.into(),
            uploaded_at,
            date_taken: None,
            make: None,
            model: None,
            latitude: None,
            longitude: None,
            altitude: None,
            focal_length: None,
            f_number: None,
            exposure_time: None,
            iso: None,
            width: None,
            height: None,
            orientation: None,
            file_size,
            faces: Vec::new(),
            face_count: 0,
        }
    }

    /// Replace the face list, keeping `face_count` in step with it.
    pub fn set_faces(&mut self, faces: Vec<FaceDetail>) {
        self.face_count = faces.len() as i64;
        self.faces = faces;
    }

    pub fn has_face(&self, face_id: &str) -> bool {
        self.faces.iter().any(|face| face.face_id == face_id)
    }
}
