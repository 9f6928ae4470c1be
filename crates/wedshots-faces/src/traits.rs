use async_trait::async_trait;
use thiserror::Error;
use wedshots_core::FaceDetail;

#[derive(Debug, Error)]
pub enum FaceIndexError {
    #[error("Rekognition request failed: {0}")]
    Request(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Unsupported image: {0}")]
    InvalidImage(String),
}

pub type FaceIndexResult<T> = Result<T, FaceIndexError>;

/// Detects faces in a stored object and adds them to a face collection
#[async_trait]
pub trait FaceIndexer: Send + Sync {
    /// Index every face in `bucket/key` into `collection_id` and describe them.
    async fn index_faces(
        &self,
        bucket: &str,
        key: &str,
        collection_id: &str,
    ) -> FaceIndexResult<Vec<FaceDetail>>;
}
