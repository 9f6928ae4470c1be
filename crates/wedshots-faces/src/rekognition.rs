use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::error::SdkError;
use aws_sdk_rekognition::operation::index_faces::IndexFacesError;
use aws_sdk_rekognition::types::{Attribute, FaceRecord, Image, QualityFilter, S3Object};
use aws_sdk_rekognition::Client as RekognitionClient;
use wedshots_core::constants::{EMOTION_CONFIDENCE_THRESHOLD, MAX_FACES_PER_PHOTO};
use wedshots_core::{BoundingBox, FaceAgeRange, FaceDetail};

use crate::traits::{FaceIndexError, FaceIndexResult, FaceIndexer};

/// Rekognition IndexFaces against photos already in S3
#[derive(Clone)]
pub struct RekognitionFaceIndexer {
    client: RekognitionClient,
}

impl RekognitionFaceIndexer {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: RekognitionClient::new(config),
        }
    }
}

#[async_trait]
impl FaceIndexer for RekognitionFaceIndexer {
    #[tracing::instrument(skip(self))]
    async fn index_faces(
        &self,
        bucket: &str,
        key: &str,
        collection_id: &str,
    ) -> FaceIndexResult<Vec<FaceDetail>> {
        let start = std::time::Instant::now();

        let image = Image::builder()
            .s3_object(S3Object::builder().bucket(bucket).name(key).build())
            .build();

        let output = self
            .client
            .index_faces()
            .collection_id(collection_id)
            .image(image)
            .detection_attributes(Attribute::All)
            .max_faces(MAX_FACES_PER_PHOTO)
            .quality_filter(QualityFilter::Auto)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    collection_id = %collection_id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Rekognition IndexFaces failed"
                );
                match &e {
                    SdkError::ServiceError(service_err) => match service_err.err() {
                        IndexFacesError::ResourceNotFoundException(_) => {
                            FaceIndexError::CollectionNotFound(collection_id.to_string())
                        }
                        IndexFacesError::InvalidImageFormatException(_)
                        | IndexFacesError::ImageTooLargeException(_)
                        | IndexFacesError::InvalidS3ObjectException(_) => {
                            FaceIndexError::InvalidImage(e.to_string())
                        }
                        _ => FaceIndexError::Request(e.to_string()),
                    },
                    _ => FaceIndexError::Request(e.to_string()),
                }
            })?;

        let faces: Vec<FaceDetail> = output
            .face_records()
            .iter()
            .filter_map(face_detail_from_record)
            .collect();

        let unindexed = output.unindexed_faces().len();
        tracing::info!(
            bucket = %bucket,
            key = %key,
            face_count = faces.len(),
            unindexed_faces = unindexed,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Faces indexed"
        );

        Ok(faces)
    }
}

/// Map one IndexFaces record to a stored face. Records without a face id are
/// dropped.
pub fn face_detail_from_record(record: &FaceRecord) -> Option<FaceDetail> {
    let face = record.face()?;
    let Some(face_id) = face.face_id() else {
        tracing::warn!("Rekognition returned a face record without a face id");
        return None;
    };

    let mut detail = FaceDetail::new(face_id, f64::from(face.confidence().unwrap_or(0.0)));

    let Some(attributes) = record.face_detail() else {
        return Some(detail);
    };

    if let Some(bbox) = attributes.bounding_box() {
        detail.bounding_box = BoundingBox {
            width: f64::from(bbox.width().unwrap_or(0.0)),
            height: f64::from(bbox.height().unwrap_or(0.0)),
            left: f64::from(bbox.left().unwrap_or(0.0)),
            top: f64::from(bbox.top().unwrap_or(0.0)),
        };
    }

    if let Some(age) = attributes.age_range() {
        detail.age_range = Some(FaceAgeRange {
            low: i64::from(age.low().unwrap_or(0)),
            high: i64::from(age.high().unwrap_or(0)),
        });
    }

    detail.gender = attributes
        .gender()
        .and_then(|g| g.value())
        .map(|v| v.as_str().to_string());

    detail.smile = attributes.smile().map(|s| s.value());

    detail.emotions = attributes
        .emotions()
        .iter()
        .filter(|emotion| emotion.confidence().unwrap_or(0.0) > EMOTION_CONFIDENCE_THRESHOLD)
        .filter_map(|emotion| emotion.r#type().map(|t| t.as_str().to_string()))
        .collect();

    Some(detail)
}
