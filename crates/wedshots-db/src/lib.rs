//! Wedshots DB Library
//!
//! Photo metadata persistence. The DynamoDB table is keyed by `photoId`
//! (partition) and `uploadedAt` (sort); records are written once by the
//! metadata worker and read back by full-table scans from the API.

pub mod db;

pub use db::{
    DynamoMetadataRepository, MetadataRepository, RepositoryError, RepositoryResult,
};
