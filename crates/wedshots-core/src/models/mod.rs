//! Data models for the application
//!
//! Photo metadata records as persisted in DynamoDB, plus the request and
//! response shapes of the upload and gallery endpoints.

mod gallery;
mod photo;
mod upload;

pub use gallery::*;
pub use photo::*;
pub use upload::*;
