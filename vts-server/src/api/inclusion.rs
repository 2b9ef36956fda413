//! Inclusion setting endpoints

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::debug;
use vts_common::Inclusion;

use crate::api::parse_json_body;
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct InclusionResponse {
    pub inclusion: Inclusion,
}

/// GET /api/inclusion
pub async fn get_inclusion(State(state): State<AppState>) -> Json<InclusionResponse> {
    Json(InclusionResponse {
        inclusion: state.session.read().await.inclusion(),
    })
}

/// POST /api/inclusion
///
/// Body `{"inclusion": number}`, any content type; the value is truncated and clamped to
/// the supported range, and the stored value is echoed back.
pub async fn set_inclusion(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<InclusionResponse>> {
    let body: serde_json::Value = parse_json_body(&body)?;
    let value = body
        .get("inclusion")
        .ok_or_else(|| ApiError::BadRequest("missing field \"inclusion\"".to_string()))?;
    let inclusion = Inclusion::from_json(value)?;

    state.session.write().await.set_inclusion(inclusion);
    debug!(inclusion = inclusion.value(), "Inclusion updated");

    Ok(Json(InclusionResponse { inclusion }))
}
