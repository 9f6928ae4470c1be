use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use chrono::Utc;
use wedshots_core::{upload_key, AppError, UploadRequest, UploadResponse};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Parse the body whatever `Content-Type` the client sent; browsers posting
/// from the page do not always set it.
fn parse_upload_request(body: &[u8]) -> Result<UploadRequest, AppError> {
    let request: UploadRequest = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("Invalid JSON".to_string()))?;

    if request.file_name.is_empty() {
        return Err(AppError::BadRequest("fileName is required".to_string()));
    }

    Ok(request)
}

/// Generate a presigned URL for a direct browser upload to S3
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Presigned URL generated", body = UploadResponse),
        (status = 400, description = "Invalid JSON or missing fileName", body = ErrorResponse),
        (status = 500, description = "Failed to generate upload URL", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(operation = "generate_upload_url"))]
pub async fn create_upload_url(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = parse_upload_request(&body)?;
    let key = upload_key(Utc::now().timestamp(), &request.file_name);

    let upload_url = state
        .storage
        .presigned_put_url(
            &state.bucket.bucket,
            &key,
            &request.content_type,
            state.bucket.upload_url_expiry,
        )
        .await?;

    tracing::info!(
        key = %key,
        content_type = %request.content_type,
        expires_in_secs = state.bucket.upload_url_expiry.as_secs(),
        "Upload URL generated"
    );

    Ok(Json(UploadResponse { upload_url, key }))
}
