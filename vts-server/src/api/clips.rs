//! Clip listing, detail and media streaming

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Request, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;
use vts_common::{ClipDetail, ClipId, ClipSummary};

use crate::api::clip_id;
use crate::{ApiError, ApiResult, AppState};

/// Extension assumed when a media file has none
const DEFAULT_MEDIA_EXTENSION: &str = "wav";

/// GET /api/clips
///
/// Summaries of every clip in the current dataset, without embeddings.
pub async fn list_clips(State(state): State<AppState>) -> Json<Vec<ClipSummary>> {
    Json(state.session.read().await.list_clips())
}

/// GET /api/clips/:id
///
/// Full clip record including the embedding vector.
pub async fn get_clip(
    State(state): State<AppState>,
    path: Result<Path<ClipId>, PathRejection>,
) -> ApiResult<Json<ClipDetail>> {
    let id = clip_id(path)?;
    state
        .session
        .read()
        .await
        .get_clip(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("not found".to_string()))
}

/// GET /api/clips/:id/audio
///
/// Streams the clip's media file. An unknown clip and a missing file are
/// both 404, with different messages.
pub async fn clip_media(
    State(state): State<AppState>,
    path: Result<Path<ClipId>, PathRejection>,
    request: Request,
) -> ApiResult<Response> {
    let id = clip_id(path)?;
    // Resolve under the lock, do file I/O after releasing it
    let media_path = state
        .session
        .read()
        .await
        .resolve_media(id)
        .ok_or_else(|| ApiError::NotFound("not found".to_string()))?;

    let is_file = tokio::fs::metadata(&media_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        debug!(clip_id = id, path = %media_path.display(), "Media file missing");
        return Err(ApiError::NotFound("audio file not found".to_string()));
    }

    let extension = media_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_MEDIA_EXTENSION)
        .to_string();

    let served = ServeFile::new(&media_path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});

    let mut response = served.map(Body::new).into_response();
    let disposition = format!("inline; filename=\"clip_{}.{}\"", id, extension);
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}
