//! Wedshots API Library
//!
//! HTTP handlers and application setup for the upload page, presigned
//! uploads, the gallery and the metadata search.

mod handlers;
mod middleware;

pub mod api_doc;
pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, BucketConfig};
