//! Storage abstraction trait
//!
//! Every operation names its bucket explicitly: the API works against its
//! configured bucket while the worker follows the bucket of each event record.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked object body
pub type DownloadStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// One entry of a bucket listing
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object as a stream of chunks
    async fn download_stream(&self, bucket: &str, key: &str) -> StorageResult<DownloadStream>;

    /// Generate a presigned PUT URL for a direct upload.
    ///
    /// A non-empty `content_type` is signed into the request, so the client
    /// must send the same `Content-Type` header with its PUT.
    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Generate a presigned GET URL for viewing an object
    async fn get_presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// List every object under `prefix`, following continuation tokens
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<StoredObject>>;
}
