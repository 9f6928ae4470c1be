//! Route configuration and setup

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{on, post, MethodFilter},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::error_details_middleware;
use crate::state::AppState;

/// Build the router: exact method + path matches, everything else is a JSON 404.
///
/// Read routes are bound to GET alone; `get(..)` would also answer HEAD.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", on(MethodFilter::GET, handlers::page::index))
        .route("/upload", post(handlers::upload::create_upload_url))
        .route("/gallery", on(MethodFilter::GET, handlers::gallery::list_gallery))
        .route("/metadata", on(MethodFilter::GET, handlers::metadata::search_metadata))
        .fallback(handlers::fallback::not_found)
        .method_not_allowed_fallback(handlers::fallback::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_details_middleware,
        ))
        .layer(setup_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin; simple methods plus the JSON content type
fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
