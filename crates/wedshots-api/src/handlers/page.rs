use axum::http::header;
use axum::response::IntoResponse;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the single-page upload and gallery UI
#[utoipa::path(
    get,
    path = "/",
    tag = "gallery",
    responses(
        (status = 200, description = "Upload and gallery page", body = String, content_type = "text/html")
    )
)]
pub async fn index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        INDEX_HTML,
    )
}
