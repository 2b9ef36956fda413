//! Evaluation query lookup
//!
//! Read-only access to the eval registry. Ranking and scoring live in the
//! external evaluation harness; the coverage report only checks that every
//! target category has at least one clip in the loaded dataset.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use vts_common::EvalDataset;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct EvalListResponse {
    pub datasets: Vec<String>,
}

/// Target category coverage of one eval entry against its loaded dataset
#[derive(Debug, Serialize)]
pub struct EvalCoverage {
    pub demo_dataset: String,
    pub total_queries: usize,
    pub missing_categories: Vec<String>,
    /// True when every target category has at least one clip
    pub complete: bool,
}

/// GET /api/eval
pub async fn list_eval(State(state): State<AppState>) -> Json<EvalListResponse> {
    Json(EvalListResponse {
        datasets: state
            .eval
            .dataset_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// GET /api/eval/:name
pub async fn get_eval(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<EvalDataset>> {
    state
        .eval
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no eval queries for '{}'", name)))
}

/// GET /api/eval/:name/coverage
pub async fn eval_coverage(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<EvalCoverage>> {
    let entry = state
        .eval
        .get(&name)
        .ok_or_else(|| ApiError::NotFound(format!("no eval queries for '{}'", name)))?;

    let dataset = state.registry.get(&entry.demo_dataset).ok_or_else(|| {
        ApiError::NotFound(format!("dataset '{}' not loaded", entry.demo_dataset))
    })?;

    let missing_categories: Vec<String> = entry
        .missing_categories(&dataset)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(EvalCoverage {
        demo_dataset: entry.demo_dataset.clone(),
        total_queries: entry.queries.len(),
        complete: missing_categories.is_empty(),
        missing_categories,
    }))
}
