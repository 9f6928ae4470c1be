use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::SecondsFormat;
use wedshots_core::constants::UPLOADS_PREFIX;
use wedshots_core::GalleryItem;
use wedshots_storage::StoredObject;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::NO_CACHE_HEADERS;
use crate::state::AppState;

fn format_last_modified(object: &StoredObject) -> String {
    object
        .last_modified
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// List every uploaded photo with a short-lived view URL
#[utoipa::path(
    get,
    path = "/gallery",
    tag = "gallery",
    responses(
        (status = 200, description = "Uploaded photos", body = Vec<GalleryItem>),
        (status = 500, description = "Failed to list files", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_gallery"))]
pub async fn list_gallery(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = std::time::Instant::now();
    let bucket = &state.bucket.bucket;

    let objects = state.storage.list_objects(bucket, UPLOADS_PREFIX).await?;

    let mut items = Vec::with_capacity(objects.len());
    for object in &objects {
        let url = match state
            .storage
            .get_presigned_url(bucket, &object.key, state.bucket.view_url_expiry)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, key = %object.key, "Skipping gallery item without view URL");
                continue;
            }
        };

        items.push(GalleryItem {
            key: object.key.clone(),
            url,
            last_modified: format_last_modified(object),
            size: object.size,
        });
    }

    tracing::info!(
        listed = objects.len(),
        returned = items.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Gallery listed"
    );

    Ok((NO_CACHE_HEADERS, Json(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_last_modified_is_rfc3339_utc() {
        let object = StoredObject {
            key: "uploads/1718000000-a.jpg".to_string(),
            size: 10,
            last_modified: Utc.timestamp_opt(1718000000, 0).single(),
        };
        assert_eq!(format_last_modified(&object), "2024-06-10T06:13:20Z");
    }

    #[test]
    fn test_missing_last_modified_is_empty() {
        let object = StoredObject {
            key: "uploads/1718000000-a.jpg".to_string(),
            size: 10,
            last_modified: None,
        };
        assert_eq!(format_last_modified(&object), "");
    }
}
