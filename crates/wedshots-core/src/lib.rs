//! Wedshots Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! metadata query builder shared by the upload API and the metadata worker.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod query;
pub mod telemetry;

// Re-export commonly used types
pub use config::{BaseConfig, Config, GalleryConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    upload_key, BoundingBox, FaceAgeRange, FaceDetail, GalleryItem, PhotoMetadata, UploadRequest,
    UploadResponse,
};
pub use query::{filter_candidates, FilterValue, MetadataQuery, ScanFilter};
