//! Admin routes: document upload and statistics.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::error::ApiError;
use crate::llm::types::LlmError;
use crate::services::admin::{self, AdminError, Statistics, UploadReceipt};
use crate::state::AppState;

/// Multipart field carrying the PDF.
pub const FILE_FIELD: &str = "file";

pub(crate) fn admin_error_to_api(err: &AdminError) -> ApiError {
    let status = match err {
        AdminError::MissingFile | AdminError::MultipleFiles => StatusCode::BAD_REQUEST,
        AdminError::InvalidFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        AdminError::Gateway(e) if matches!(e.cause(), LlmError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
        AdminError::Gateway(_) => StatusCode::BAD_GATEWAY,
        AdminError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError::new(status, err)
}

fn multipart_error_to_api(err: &MultipartError) -> ApiError {
    ApiError::with_message(err.status(), "E_MULTIPART", err.body_text())
}

/// `POST /api/admin/document` — validate, extract, and install a new PDF.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, ApiError> {
    let mut seen_file = false;
    let mut file_name = None;
    let mut media_type = None;
    let mut bytes = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error_to_api(&e))? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if seen_file {
            return Err(admin_error_to_api(&AdminError::MultipleFiles));
        }
        seen_file = true;
        file_name = field.file_name().map(str::to_string);
        media_type = field.content_type().map(str::to_string);
        bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error_to_api(&e))?
            .to_vec();
    }

    let upload = admin::validate_upload(file_name.as_deref(), media_type.as_deref(), bytes)
        .map_err(|e| admin_error_to_api(&e))?;
    let receipt = admin::upload_document(&state, upload)
        .await
        .map_err(|e| admin_error_to_api(&e))?;
    Ok(Json(receipt))
}

/// `GET /api/admin/stats` — session and question statistics.
pub async fn stats(State(state): State<AppState>) -> Json<Statistics> {
    Json(admin::statistics(&state).await)
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
