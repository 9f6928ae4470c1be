//! Wedshots Faces Library
//!
//! Indexes the faces found in an uploaded photo into a Rekognition collection
//! so guests can later find every photo they appear in by face id.

pub mod rekognition;
pub mod traits;

pub use rekognition::RekognitionFaceIndexer;
pub use traits::{FaceIndexError, FaceIndexResult, FaceIndexer};
