//! Session: the current dataset selection and its vote state
//!
//! The session owns every piece of mutable state in the browser. A dataset
//! switch replaces the selection and clears the vote ledger in one step;
//! callers that share a session across tasks wrap it in a single
//! reader-writer lock so readers never see a half-applied switch.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::clip::{Clip, ClipDetail, ClipId, ClipSummary};
use crate::inclusion::Inclusion;
use crate::registry::DatasetRegistry;
use crate::votes::{VoteLedger, VoteMark, VoteSnapshot};
use crate::{Error, Result};

/// A clip of the selected dataset with its media location resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveClip {
    pub clip: Arc<Clip>,
    pub media_path: PathBuf,
}

/// Catalog entry as shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub clip_count: usize,
    pub is_current: bool,
}

/// Session summary for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub datasets_loaded: usize,
    pub current_dataset: Option<String>,
    pub num_clips: usize,
    pub good_votes: usize,
    pub bad_votes: usize,
}

#[derive(Debug, Clone)]
struct Selection {
    name: String,
    clips: BTreeMap<ClipId, ActiveClip>,
}

/// Current dataset selection plus the votes cast against it
#[derive(Debug)]
pub struct Session {
    registry: Arc<DatasetRegistry>,
    selection: Option<Selection>,
    votes: VoteLedger,
    inclusion: Inclusion,
}

impl Session {
    /// Create a session with nothing selected
    pub fn new(registry: Arc<DatasetRegistry>) -> Self {
        Self {
            registry,
            selection: None,
            votes: VoteLedger::new(),
            inclusion: Inclusion::default(),
        }
    }

    pub fn registry(&self) -> &Arc<DatasetRegistry> {
        &self.registry
    }

    /// Switch to dataset `name`
    ///
    /// On success the clip set is replaced and all votes are dropped. An
    /// unknown name returns [`Error::NotFound`] and leaves the session as it was.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let dataset = self
            .registry
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("dataset '{}'", name)))?;

        let clips = dataset
            .clips()
            .iter()
            .map(|(&id, clip)| {
                let active = ActiveClip {
                    clip: Arc::clone(clip),
                    media_path: dataset.media_path(clip),
                };
                (id, active)
            })
            .collect();

        // Nothing below can fail
        self.selection = Some(Selection {
            name: name.to_string(),
            clips,
        });
        self.votes.reset();

        info!("Switched to dataset: {} ({} clips)", name, dataset.len());
        Ok(())
    }

    /// Name of the selected dataset, if any
    pub fn current_dataset(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.name.as_str())
    }

    /// Every loaded dataset, flagged with whether it is the current one
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let current = self.current_dataset();
        self.registry
            .list()
            .into_iter()
            .map(|info| CatalogEntry {
                is_current: current == Some(info.name.as_str()),
                name: info.name,
                clip_count: info.clip_count,
            })
            .collect()
    }

    /// Number of clips in the selection
    pub fn clip_count(&self) -> usize {
        self.selection.as_ref().map_or(0, |s| s.clips.len())
    }

    pub fn active_clip(&self, id: ClipId) -> Option<&ActiveClip> {
        self.selection.as_ref().and_then(|s| s.clips.get(&id))
    }

    /// Active clips in ascending id order
    pub fn active_clips(&self) -> impl Iterator<Item = &ActiveClip> {
        self.selection.iter().flat_map(|s| s.clips.values())
    }

    /// Clip summaries (no embeddings) in ascending id order
    pub fn list_clips(&self) -> Vec<ClipSummary> {
        self.active_clips()
            .map(|a| ClipSummary::from(a.clip.as_ref()))
            .collect()
    }

    /// Full clip record, or None if the id is not in the selection
    pub fn get_clip(&self, id: ClipId) -> Option<ClipDetail> {
        self.active_clip(id).map(|a| ClipDetail::from(a.clip.as_ref()))
    }

    /// Media location of a clip, or None if the id is not in the selection
    ///
    /// The returned path may not exist; checking is up to the caller.
    pub fn resolve_media(&self, id: ClipId) -> Option<PathBuf> {
        self.active_clip(id).map(|a| a.media_path.clone())
    }

    /// Toggle a vote on a clip of the selection
    ///
    /// Returns the clip's resulting mark. Unknown ids fail with
    /// [`Error::NotFound`] without touching the ledger.
    pub fn toggle_vote(&mut self, id: ClipId, mark: VoteMark) -> Result<Option<VoteMark>> {
        if self.active_clip(id).is_none() {
            return Err(Error::NotFound(format!("clip {}", id)));
        }
        let result = self.votes.toggle(id, mark);
        debug!(clip_id = id, vote = %mark, result = ?result, "Vote toggled");
        Ok(result)
    }

    /// Sorted vote sets
    pub fn votes(&self) -> VoteSnapshot {
        self.votes.snapshot()
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.votes
    }

    pub fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    pub fn set_inclusion(&mut self, inclusion: Inclusion) {
        self.inclusion = inclusion;
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            datasets_loaded: self.registry.len(),
            current_dataset: self.current_dataset().map(str::to_string),
            num_clips: self.clip_count(),
            good_votes: self.votes.good_count(),
            bad_votes: self.votes.bad_count(),
        }
    }
}
