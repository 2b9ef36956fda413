//! Dataset catalog and selection

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use vts_common::session::CatalogEntry;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub ok: bool,
    pub dataset: String,
}

/// GET /api/datasets
///
/// All loaded datasets in name order, flagged with the current selection.
pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.session.read().await.catalog())
}

/// POST /api/datasets/:name/select
///
/// Switches the session to `name`, dropping every vote. Unknown names are a
/// 404 and leave the session untouched.
pub async fn select_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SelectResponse>> {
    state
        .session
        .write()
        .await
        .select(&name)
        .map_err(|_| ApiError::NotFound("Dataset not found".to_string()))?;

    Ok(Json(SelectResponse {
        ok: true,
        dataset: name,
    }))
}
