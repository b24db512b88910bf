use axum::{
    extract::{multipart::MultipartRejection, Extension, Multipart},
    Json,
};

use crate::domains::storage::{upload_file, UploadedFile};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// Multipart field holding the file.
const FILE_FIELD: &str = "file";

/// `POST /upload` - multipart form with a `file` field.
pub async fn upload_handler(
    Extension(state): Extension<AxumAppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedFile>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        let uploaded = upload_file(
            &file_name,
            content_type.as_deref(),
            bytes.to_vec(),
            &state.server_deps,
        )
        .await?;
        return Ok(Json(uploaded));
    }

    Err(ApiError::MissingField(FILE_FIELD))
}
