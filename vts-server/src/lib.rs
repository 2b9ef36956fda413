//! vts-server library - VTSearch clip browser service
//!
//! Serves dataset catalogs, clip listings and details, clip media, the
//! good/bad vote ledger and evaluation query definitions over HTTP.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use vts_common::{DatasetRegistry, EvalRegistry, Session};

pub mod api;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
///
/// The session sits behind a single lock: dataset switches, votes and the
/// inclusion setting take the write side, everything else the read side.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    /// Loaded datasets (immutable, readable without the session lock)
    pub registry: Arc<DatasetRegistry>,
    pub eval: Arc<EvalRegistry>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(session: Session, eval: Arc<EvalRegistry>) -> Self {
        let registry = Arc::clone(session.registry());
        Self {
            session: Arc::new(RwLock::new(session)),
            registry,
            eval,
            startup_time: Utc::now(),
        }
    }
}

/// Create the session and select the startup dataset
///
/// Prefers `default_dataset`; if that one did not load, falls back to the
/// first dataset in catalog order. With no datasets the session stays empty.
pub fn open_session(registry: DatasetRegistry, default_dataset: &str) -> Session {
    let mut session = Session::new(Arc::new(registry));

    let target = if session.registry().contains(default_dataset) {
        Some(default_dataset.to_string())
    } else {
        let fallback = session.registry().first_name().map(str::to_string);
        if let Some(name) = &fallback {
            warn!(
                "Default dataset '{}' not available, selecting '{}'",
                default_dataset, name
            );
        }
        fallback
    };

    match target {
        Some(name) => {
            // Name comes from the registry, so this cannot miss
            if let Err(e) = session.select(&name) {
                warn!("Failed to select startup dataset '{}': {}", name, e);
            }
        }
        None => info!("No dataset selected"),
    }

    session
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/status", get(api::get_status))
        .route("/api/datasets", get(api::list_datasets))
        .route("/api/datasets/:name/select", post(api::select_dataset))
        .route("/api/clips", get(api::list_clips))
        .route("/api/clips/:id", get(api::get_clip))
        .route("/api/clips/:id/audio", get(api::clip_media))
        .route("/api/clips/:id/vote", post(api::vote_clip))
        .route("/api/votes", get(api::get_votes))
        .route(
            "/api/inclusion",
            get(api::get_inclusion).post(api::set_inclusion),
        )
        .route("/api/eval", get(api::list_eval))
        .route("/api/eval/:name", get(api::get_eval))
        .route("/api/eval/:name/coverage", get(api::eval_coverage));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vts_common::{Clip, Dataset};

    fn dataset(name: &str) -> Dataset {
        let clip = Clip {
            id: 1,
            category: "dog".to_string(),
            duration: 1.0,
            file_size: 1,
            embedding: vec![1.0],
            filename: "1.wav".to_string(),
        };
        Dataset::new(name, "/media", vec![clip]).unwrap()
    }

    #[test]
    fn test_open_session_prefers_default() {
        let registry = DatasetRegistry::from_datasets(vec![dataset("animals"), dataset("birds")]);
        let session = open_session(registry, "birds");
        assert_eq!(session.current_dataset(), Some("birds"));
    }

    #[test]
    fn test_open_session_falls_back_to_first() {
        let registry = DatasetRegistry::from_datasets(vec![dataset("sounds_s"), dataset("images_s")]);
        let session = open_session(registry, "animals");
        assert_eq!(session.current_dataset(), Some("images_s"));
    }

    #[test]
    fn test_open_session_without_datasets() {
        let session = open_session(DatasetRegistry::new(), "animals");
        assert_eq!(session.current_dataset(), None);
        assert_eq!(session.clip_count(), 0);
    }
}
