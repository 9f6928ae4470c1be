//! Scratch-file downloads
//!
//! Objects are streamed to a [`NamedTempFile`] which removes itself when
//! dropped, so the local copy is released on every exit path of the caller.

use futures::StreamExt;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use wedshots_storage::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to write temporary file: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Stream `bucket/key` into a new temporary file.
///
/// Returns the file handle together with the number of bytes written. The
/// file is deleted as soon as the handle is dropped.
pub async fn download_to_temp(
    storage: &dyn Storage,
    bucket: &str,
    key: &str,
) -> Result<(NamedTempFile, u64), DownloadError> {
    let start = std::time::Instant::now();
    let mut stream = storage.download_stream(bucket, key).await?;

    let temp = tempfile::Builder::new().prefix("photo-").tempfile()?;
    let mut file = tokio::fs::File::from_std(temp.reopen()?);

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    tracing::debug!(
        bucket = %bucket,
        key = %key,
        size_bytes = written,
        path = %temp.path().display(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object downloaded to temporary file"
    );

    Ok((temp, written))
}
