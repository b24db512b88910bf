// HTTP routes
pub mod analyze;
pub mod auth;
pub mod email;
pub mod health;
pub mod upload;

pub use analyze::*;
pub use auth::*;
pub use email::*;
pub use health::*;
pub use upload::*;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::server::error::ApiError;

/// Parse a JSON request body. Malformed JSON is a 400, not axum's 422.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))
}

/// Plain `OPTIONS` without CORS preflight headers.
pub async fn options_handler() -> &'static str {
    "ok"
}

/// Any method a route does not serve.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
