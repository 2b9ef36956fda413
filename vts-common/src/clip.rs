//! Clip model and its API projections

use serde::{Deserialize, Serialize};

/// Clip identity, unique within one dataset
pub type ClipId = u64;

/// A single media item with its precomputed embedding
///
/// Created when a dataset is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    /// Ground-truth class label
    pub category: String,
    /// Duration in seconds (informational)
    pub duration: f64,
    /// Size of the media file in bytes (informational)
    pub file_size: u64,
    pub embedding: Vec<f32>,
    /// Media file name relative to the dataset's media root
    pub filename: String,
}

impl Clip {
    pub fn embedding_dim(&self) -> usize {
        self.embedding.len()
    }
}

/// Lightweight clip listing entry
///
/// Omits the embedding vector, which dominates the payload size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipSummary {
    pub id: ClipId,
    pub category: String,
    pub duration: f64,
    pub file_size: u64,
}

impl From<&Clip> for ClipSummary {
    fn from(clip: &Clip) -> Self {
        Self {
            id: clip.id,
            category: clip.category.clone(),
            duration: clip.duration,
            file_size: clip.file_size,
        }
    }
}

/// Full clip record including the embedding vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipDetail {
    pub id: ClipId,
    pub category: String,
    pub duration: f64,
    pub file_size: u64,
    pub embedding_dim: usize,
    pub embedding: Vec<f32>,
}

impl From<&Clip> for ClipDetail {
    fn from(clip: &Clip) -> Self {
        Self {
            id: clip.id,
            category: clip.category.clone(),
            duration: clip.duration,
            file_size: clip.file_size,
            embedding_dim: clip.embedding_dim(),
            embedding: clip.embedding.clone(),
        }
    }
}
