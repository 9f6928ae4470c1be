//! Error detail exposure
//!
//! Outside production, error responses that carry a [`DetailedErrorResponse`]
//! are re-rendered with their `details` and `error_type`. In production the
//! extension is dropped and the client keeps the plain body.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::DetailedErrorResponse;
use crate::state::AppState;

pub async fn error_details_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(DetailedErrorResponse(body)) = response.extensions_mut().remove::<DetailedErrorResponse>()
    else {
        return response;
    };

    if state.config.is_production() {
        return response;
    }

    let (parts, _) = response.into_parts();
    (parts.status, parts.headers, Json(body)).into_response()
}
