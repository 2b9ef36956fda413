//! Vote casting and the vote ledger snapshot

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use vts_common::{ClipId, VoteMark, VoteSnapshot};

use crate::api::{clip_id, parse_json_body};
use crate::{ApiError, ApiResult, AppState};

/// Body of a vote request
///
/// `vote` is kept loose here so that a missing or non-string value gets the
/// same rejection as an unknown mark.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub ok: bool,
    /// Mark the clip carries after this vote (null when toggled off)
    pub vote: Option<VoteMark>,
}

fn parse_mark(request: &VoteRequest) -> ApiResult<VoteMark> {
    match request.vote.as_ref().and_then(|v| v.as_str()) {
        Some(s) => Ok(s.parse::<VoteMark>()?),
        None => Err(ApiError::BadRequest(
            "vote must be \"good\" or \"bad\"".to_string(),
        )),
    }
}

/// POST /api/clips/:id/vote
///
/// Body `{"vote": "good" | "bad"}`, parsed whatever the content type.
/// Voting the clip's current mark removes it, voting the other mark moves
/// it. An unknown clip is 404 before the body is looked at.
pub async fn vote_clip(
    State(state): State<AppState>,
    path: Result<Path<ClipId>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<VoteResponse>> {
    let id = clip_id(path)?;
    let request = parse_json_body::<VoteRequest>(&body);

    let mut session = state.session.write().await;
    if session.active_clip(id).is_none() {
        return Err(ApiError::NotFound("not found".to_string()));
    }
    let mark = parse_mark(&request?)?;

    let result = session
        .toggle_vote(id, mark)
        .map_err(|_| ApiError::NotFound("not found".to_string()))?;

    Ok(Json(VoteResponse {
        ok: true,
        vote: result,
    }))
}

/// GET /api/votes
///
/// Good and bad clip ids, each sorted ascending.
pub async fn get_votes(State(state): State<AppState>) -> Json<VoteSnapshot> {
    Json(state.session.read().await.votes())
}
