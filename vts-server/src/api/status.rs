//! Session status endpoint

use axum::{extract::State, Json};
use vts_common::session::SessionStatus;

use crate::AppState;

/// GET /api/status
///
/// Datasets loaded, current selection and vote counts.
pub async fn get_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.read().await.status())
}
