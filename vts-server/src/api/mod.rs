//! HTTP API handlers for vts-server

pub mod clips;
pub mod datasets;
pub mod eval;
pub mod health;
pub mod inclusion;
pub mod status;
pub mod votes;

pub use clips::{clip_media, get_clip, list_clips};
pub use datasets::{list_datasets, select_dataset};
pub use eval::{eval_coverage, get_eval, list_eval};
pub use health::health_routes;
pub use inclusion::{get_inclusion, set_inclusion};
pub use status::get_status;
pub use votes::{get_votes, vote_clip};

use axum::extract::{rejection::PathRejection, Path};
use serde::de::DeserializeOwned;
use vts_common::ClipId;

use crate::{ApiError, ApiResult};

/// Clip id from the path; an id that is not a number names no clip
pub(crate) fn clip_id(path: Result<Path<ClipId>, PathRejection>) -> ApiResult<ClipId> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::NotFound("not found".to_string()))
}

/// Parse a JSON request body regardless of its `Content-Type` header
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))
}
