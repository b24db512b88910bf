//! HTTP error responses.
//!
//! Every handler returns `Result<_, ApiError>`. The error is logged once, here,
//! when it is turned into a response: `error!` for 5xx, `warn!` for 4xx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::common::ServiceError;
use crate::domains::analysis::AnalysisError;
use crate::kernel::UpstreamError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidAddress(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Names the missing setting; only the name is logged, never sent.
    #[error("Server configuration error")]
    Configuration(&'static str),

    #[error("{} request failed", .0.service)]
    Upstream(UpstreamError),

    #[error("Market search returned no content")]
    UpstreamEmpty,

    #[error("Could not parse extraction reply")]
    ExtractionParse { message: String, raw: String },

    #[error("Not enough comparable listings to value the property")]
    InsufficientData {
        found: usize,
        required: usize,
        raw_text: String,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MissingField(_)
            | ApiError::InvalidAddress(_)
            | ApiError::InsufficientData { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Configuration(_)
            | ApiError::Upstream(_)
            | ApiError::UpstreamEmpty
            | ApiError::ExtractionParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        let message = self.to_string();
        match self {
            ApiError::Upstream(upstream) => json!({
                "error": message,
                "details": upstream.body,
            }),
            ApiError::ExtractionParse { message: details, raw } => json!({
                "error": message,
                "details": details,
                "raw_text": raw,
            }),
            ApiError::InsufficientData {
                found,
                required,
                raw_text,
            } => json!({
                "error": message,
                "found": found,
                "required": required,
                "raw_text": raw_text,
            }),
            _ => json!({ "error": message }),
        }
    }

    fn log(&self, status: StatusCode) {
        match self {
            ApiError::Configuration(setting) => {
                error!(setting = %setting, "Collaborator not configured")
            }
            ApiError::Upstream(upstream) => error!(
                service = upstream.service,
                upstream_status = ?upstream.status,
                body = %upstream.body,
                "Upstream request failed"
            ),
            ApiError::InvalidAddress(address) => {
                warn!(address = %address, "Rejected invalid email address")
            }
            _ if status.is_server_error() => error!(error = %self, "Request failed"),
            _ => warn!(status = status.as_u16(), error = %self, "Request rejected"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);
        (status, Json(self.body())).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::MissingField(field) => ApiError::MissingField(field),
            ServiceError::InvalidAddress(address) => ApiError::InvalidAddress(address),
            ServiceError::Invalid(message) => ApiError::Validation(message),
            ServiceError::NotConfigured(setting) => ApiError::Configuration(setting),
            ServiceError::Upstream(upstream) => ApiError::Upstream(upstream),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NotConfigured(setting) => ApiError::Configuration(setting),
            AnalysisError::Upstream(upstream) => ApiError::Upstream(upstream),
            AnalysisError::EmptyMarketReport => ApiError::UpstreamEmpty,
            AnalysisError::ExtractionParse { message, raw } => {
                ApiError::ExtractionParse { message, raw }
            }
            AnalysisError::InsufficientData {
                found,
                required,
                market_report,
            } => ApiError::InsufficientData {
                found,
                required,
                raw_text: market_report,
            },
        }
    }
}
