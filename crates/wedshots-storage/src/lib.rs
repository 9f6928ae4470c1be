//! Wedshots Storage Library
//!
//! Object storage abstraction used by the upload API (presigned URLs, gallery
//! listing) and the metadata worker (downloads). The production backend is S3;
//! tests substitute in-memory implementations of [`Storage`].

pub mod aws;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use aws::load_sdk_config;
pub use s3::S3Storage;
pub use traits::{DownloadStream, Storage, StorageError, StorageResult, StoredObject};
