//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use wedshots_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wedshots API",
        version = "0.1.0",
        description = "Wedding photo sharing: presigned uploads straight to S3, a gallery of every uploaded photo, and search over extracted EXIF and face metadata."
    ),
    paths(
        handlers::page::index,
        handlers::upload::create_upload_url,
        handlers::gallery::list_gallery,
        handlers::metadata::search_metadata,
    ),
    components(
        schemas(
            models::UploadRequest,
            models::UploadResponse,
            models::GalleryItem,
            models::PhotoMetadata,
            models::FaceDetail,
            models::FaceAgeRange,
            models::BoundingBox,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Presigned upload URLs"),
        (name = "gallery", description = "Upload page and photo listing"),
        (name = "metadata", description = "Photo metadata search")
    )
)]
pub struct ApiDoc;
