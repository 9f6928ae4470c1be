//! Wedshots metadata worker
//!
//! Invoked by S3 `ObjectCreated` notifications for `uploads/`. For each object
//! it downloads a scratch copy, reads EXIF, indexes faces into the Rekognition
//! collection and stores the merged record in DynamoDB. Records are handled one
//! after another and a failure never stops the rest of the batch.

pub mod pipeline;

pub use pipeline::{BatchSummary, MetadataPipeline, ObjectRef, RecordOutcome};
