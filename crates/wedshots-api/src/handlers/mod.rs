//! HTTP request handlers

pub mod fallback;
pub mod gallery;
pub mod metadata;
pub mod page;
pub mod upload;

use axum::http::header::{self, HeaderName};

/// Listings change with every upload, so browsers and proxies must not cache them.
pub(crate) const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];
