use axum::{extract::Extension, Json};
use bytes::Bytes;
use serde::Serialize;

use crate::domains::email::{send_email, SendEmailBody};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::routes::parse_json;

#[derive(Serialize)]
pub struct SendEmailResponse {
    success: bool,
    id: String,
}

/// `POST /send-email`
pub async fn send_email_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let body: SendEmailBody = parse_json(&body)?;
    let id = send_email(body, &state.server_deps).await?;

    Ok(Json(SendEmailResponse { success: true, id }))
}
