use crate::traits::{DownloadStream, Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use std::time::Duration;
use tokio_util::io::ReaderStream;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Create a new S3Storage from the shared AWS configuration
    ///
    /// # Arguments
    /// * `config` - Loaded AWS configuration (region, credentials)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:4566" for LocalStack, "http://localhost:9000" for MinIO)
    pub fn new(config: &SdkConfig, endpoint_url: Option<&str>) -> Self {
        let client = match endpoint_url {
            Some(endpoint) => {
                // Path-style addressing is required by MinIO and LocalStack
                let s3_config = aws_sdk_s3::config::Builder::from(config)
                    .endpoint_url(endpoint)
                    .force_path_style(true)
                    .build();
                Client::from_conf(s3_config)
            }
            None => Client::new(config),
        };

        S3Storage { client }
    }
}

fn to_utc(value: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(value.secs(), value.subsec_nanos())
}

#[async_trait]
impl Storage for S3Storage {
    #[tracing::instrument(skip(self))]
    async fn download_stream(&self, bucket: &str, key: &str) -> StorageResult<DownloadStream> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => StorageError::NotFound(key.to_string()),
                    _ => StorageError::DownloadFailed(e.to_string()),
                },
                _ => StorageError::DownloadFailed(e.to_string()),
            })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            content_length = ?response.content_length(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 get_object started"
        );

        let async_read = response.body.into_async_read();
        let stream = ReaderStream::new(async_read)
            .map(|result| result.map_err(|e| StorageError::DownloadFailed(e.to_string())));

        let bucket = bucket.to_string();
        let key = key.to_string();
        let logged_stream = stream.map(move |item| {
            if let Err(e) = &item {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 stream download error"
                );
            }
            item
        });

        Ok(Box::pin(logged_stream))
    }

    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let mut request = self.client.put_object().bucket(bucket).key(key);
        if !content_type.is_empty() {
            request = request.content_type(content_type);
        }

        let presigned_request = request.presigned(presigning_config).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                "S3 PUT presign failed"
            );
            StorageError::PresignFailed(e.to_string())
        })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            expires_in_secs = expires_in.as_secs(),
            "Presigned upload URL generated"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn get_presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        Ok(presigned_request.uri().to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let start = std::time::Instant::now();
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        prefix = %prefix,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 list_objects_v2 failed"
                    );
                    StorageError::ListFailed(e.to_string())
                })?;

            for object in output.contents() {
                let Some(key) = object.key() else {
                    continue;
                };
                objects.push(StoredObject {
                    key: key.to_string(),
                    size: object.size().unwrap_or_default(),
                    last_modified: object.last_modified().and_then(to_utc),
                });
            }

            match output.next_continuation_token() {
                Some(token) if output.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::info!(
            bucket = %bucket,
            prefix = %prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 listing complete"
        );

        Ok(objects)
    }
}
