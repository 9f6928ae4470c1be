//! Repository trait and its DynamoDB implementation

mod metadata;

pub use metadata::DynamoMetadataRepository;

use async_trait::async_trait;
use thiserror::Error;
use wedshots_core::{PhotoMetadata, ScanFilter};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("DynamoDB request failed: {0}")]
    Request(String),

    #[error("Failed to serialize item: {0}")]
    Serialization(String),

    #[error("Failed to deserialize item: {0}")]
    Deserialization(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage of photo metadata records
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Write one record, replacing any item with the same key
    async fn put_metadata(&self, metadata: &PhotoMetadata) -> RepositoryResult<()>;

    /// Every record matching `filter` (all records when `None`), in table order
    async fn scan_metadata(&self, filter: Option<&ScanFilter>) -> RepositoryResult<Vec<PhotoMetadata>>;
}
