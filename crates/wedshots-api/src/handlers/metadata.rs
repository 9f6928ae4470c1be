use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use wedshots_core::{MetadataQuery, PhotoMetadata};

use crate::error::{ErrorResponse, HttpAppError, QueryPairs};
use crate::handlers::NO_CACHE_HEADERS;
use crate::state::AppState;

/// Search photo metadata by face, face count, capture date and device.
///
/// A repeated parameter takes its first value.
#[utoipa::path(
    get,
    path = "/metadata",
    tag = "metadata",
    params(MetadataQuery),
    responses(
        (status = 200, description = "Matching photo records", body = Vec<PhotoMetadata>),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Failed to query metadata", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, pairs), fields(operation = "search_metadata", face_id = tracing::field::Empty))]
pub async fn search_metadata(
    State(state): State<Arc<AppState>>,
    QueryPairs(pairs): QueryPairs,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = std::time::Instant::now();
    let query = MetadataQuery::from_pairs(pairs);
    if let Some(face_id) = query.face_id() {
        tracing::Span::current().record("face_id", face_id);
    }
    let filter = query.scan_filter();

    let scanned = state
        .metadata_repository
        .scan_metadata(filter.as_ref())
        .await?;
    let scanned_count = scanned.len();

    let records = query.apply_face_filter(scanned);

    tracing::info!(
        scanned = scanned_count,
        returned = records.len(),
        filter = filter.as_ref().map(|f| f.expression.as_str()).unwrap_or(""),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Metadata query complete"
    );

    Ok((NO_CACHE_HEADERS, Json(records)))
}
