use axum::{extract::Extension, Json};
use bytes::Bytes;

use crate::domains::analysis::run_analysis;
use crate::domains::valuation::{ValuationRequestBody, ValuationResult};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::routes::parse_json;

/// `POST /analyze` - value a property from live market listings.
pub async fn analyze_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Result<Json<ValuationResult>, ApiError> {
    let body: ValuationRequestBody = parse_json(&body)?;
    let deps = &state.server_deps;
    let request = body.into_request(&deps.valuation_settings);

    let result = run_analysis(&request, deps).await?;
    Ok(Json(result))
}
