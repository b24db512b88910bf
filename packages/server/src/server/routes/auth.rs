use axum::{extract::Extension, Json};
use bytes::Bytes;
use serde::Serialize;

use crate::domains::auth::{send_magic_link, AuthActionBody};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::routes::parse_json;

#[derive(Serialize)]
pub struct AuthResponse {
    success: bool,
    message: String,
}

/// `POST /auth` - `{ "action": "sendMagicLink", "email": ... }`
pub async fn auth_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Result<Json<AuthResponse>, ApiError> {
    let body: AuthActionBody = parse_json(&body)?;
    let email = send_magic_link(body, &state.server_deps).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: format!("Magic link sent to {}", email),
    }))
}
