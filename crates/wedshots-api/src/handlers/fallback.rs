use wedshots_core::AppError;

use crate::error::HttpAppError;

/// Any unmatched method and path combination
pub async fn not_found() -> HttpAppError {
    HttpAppError(AppError::NotFound("Not found".to_string()))
}
