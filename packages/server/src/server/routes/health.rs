use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    collaborators: CollaboratorHealth,
}

/// Which collaborators have credentials. Nothing is called.
#[derive(Serialize)]
pub struct CollaboratorHealth {
    search: bool,
    extraction: bool,
    email: bool,
    storage: bool,
    auth: bool,
}

/// Health check endpoint
pub async fn health_handler(Extension(state): Extension<AxumAppState>) -> Json<HealthResponse> {
    let deps = &state.server_deps;

    Json(HealthResponse {
        status: "ok".to_string(),
        collaborators: CollaboratorHealth {
            search: deps.market_search.is_some(),
            extraction: deps.extractor.is_some(),
            email: deps.email.is_some(),
            storage: deps.storage.is_some(),
            auth: deps.auth.is_some(),
        },
    })
}
