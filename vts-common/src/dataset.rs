//! Datasets and the sources they are loaded from
//!
//! A dataset is a named, immutable set of clips plus the folder its media
//! files live in. Where datasets come from is abstracted behind
//! [`DatasetSource`]; the shipped implementation is [`JsonDirSource`], one
//! `<name>.json` file per dataset.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::clip::{Clip, ClipId};
use crate::{Error, Result};

/// File extension of dataset files in a [`JsonDirSource`]
pub const DATASET_EXTENSION: &str = "json";

/// A loaded dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    media_root: PathBuf,
    clips: BTreeMap<ClipId, Arc<Clip>>,
}

impl Dataset {
    /// Build a dataset, checking that clip ids are unique and that every
    /// embedding has the same length
    pub fn new(
        name: impl Into<String>,
        media_root: impl Into<PathBuf>,
        clips: impl IntoIterator<Item = Clip>,
    ) -> Result<Self> {
        let name = name.into();
        let mut map = BTreeMap::new();
        let mut dim: Option<usize> = None;

        for clip in clips {
            match dim {
                None => dim = Some(clip.embedding_dim()),
                Some(expected) if expected != clip.embedding_dim() => {
                    return Err(Error::InvalidDataset {
                        name,
                        reason: format!(
                            "clip {} has embedding length {}, expected {}",
                            clip.id,
                            clip.embedding_dim(),
                            expected
                        ),
                    });
                }
                Some(_) => {}
            }

            let id = clip.id;
            if map.insert(id, Arc::new(clip)).is_some() {
                return Err(Error::InvalidDataset {
                    name,
                    reason: format!("duplicate clip id {}", id),
                });
            }
        }

        Ok(Self {
            name,
            media_root: media_root.into(),
            clips: map,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Clips keyed by id, in ascending id order
    pub fn clips(&self) -> &BTreeMap<ClipId, Arc<Clip>> {
        &self.clips
    }

    pub fn get(&self, id: ClipId) -> Option<&Arc<Clip>> {
        self.clips.get(&id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Embedding length shared by all clips (None for an empty dataset)
    pub fn embedding_dim(&self) -> Option<usize> {
        self.clips.values().next().map(|c| c.embedding_dim())
    }

    /// Resolved location of a clip's media file
    ///
    /// The file is not required to exist.
    pub fn media_path(&self, clip: &Clip) -> PathBuf {
        self.media_root.join(&clip.filename)
    }

    /// Distinct category labels present in the dataset
    pub fn categories(&self) -> BTreeSet<&str> {
        self.clips.values().map(|c| c.category.as_str()).collect()
    }

    /// On-disk representation of this dataset
    pub fn to_file(&self) -> DatasetFile {
        DatasetFile {
            media_root: self.media_root.clone(),
            clips: self
                .clips
                .values()
                .map(|c| (c.id, ClipRecord::from(c.as_ref())))
                .collect(),
        }
    }
}

/// Serialized dataset shape
///
/// Clip ids are the map keys. `audio_dir` is accepted as an alias of
/// `media_root` for datasets packaged by older tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(alias = "audio_dir")]
    pub media_root: PathBuf,
    pub clips: BTreeMap<ClipId, ClipRecord>,
}

/// Serialized clip (the id lives in the enclosing map key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub category: String,
    pub duration: f64,
    pub file_size: u64,
    pub embedding: Vec<f32>,
    pub filename: String,
}

impl From<&Clip> for ClipRecord {
    fn from(clip: &Clip) -> Self {
        Self {
            category: clip.category.clone(),
            duration: clip.duration,
            file_size: clip.file_size,
            embedding: clip.embedding.clone(),
            filename: clip.filename.clone(),
        }
    }
}

impl DatasetFile {
    /// Convert into a [`Dataset`]
    ///
    /// A relative `media_root` is resolved against `base_dir`.
    pub fn into_dataset(self, name: &str, base_dir: &Path) -> Result<Dataset> {
        let media_root = if self.media_root.is_relative() {
            base_dir.join(&self.media_root)
        } else {
            self.media_root
        };

        let clips = self.clips.into_iter().map(|(id, record)| Clip {
            id,
            category: record.category,
            duration: record.duration,
            file_size: record.file_size,
            embedding: record.embedding,
            filename: record.filename,
        });

        Dataset::new(name, media_root, clips)
    }
}

/// Somewhere datasets can be discovered and loaded from
pub trait DatasetSource {
    /// Names of all datasets this source offers
    fn discover(&self) -> Result<Vec<String>>;

    /// Load one dataset by name
    fn load(&self, name: &str) -> Result<Dataset>;
}

/// Directory of `<name>.json` dataset files
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing dataset `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, DATASET_EXTENSION))
    }

    /// Write a dataset file, creating the directory if needed
    pub fn save(&self, name: &str, file: &DatasetFile) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        let bytes = serde_json::to_vec(file)?;
        std::fs::write(&path, bytes)?;
        debug!(dataset = name, path = %path.display(), "Wrote dataset file");
        Ok(path)
    }
}

impl DatasetSource for JsonDirSource {
    fn discover(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(Error::NotFound(format!(
                "dataset directory {}",
                self.dir.display()
            )));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(DATASET_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Dataset> {
        let path = self.path_for(name);
        let bytes = std::fs::read(&path)?;
        let file: DatasetFile = serde_json::from_slice(&bytes)?;
        file.into_dataset(name, &self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(id: ClipId, category: &str, embedding: Vec<f32>) -> Clip {
        Clip {
            id,
            category: category.to_string(),
            duration: 5.0,
            file_size: 1000 + id,
            embedding,
            filename: format!("clip_{}.wav", id),
        }
    }

    #[test]
    fn test_new_rejects_mismatched_embedding_dims() {
        let result = Dataset::new(
            "bad",
            "/media",
            vec![clip(1, "dog", vec![0.0, 1.0]), clip(2, "cat", vec![0.0])],
        );
        assert!(matches!(result, Err(Error::InvalidDataset { .. })));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Dataset::new(
            "dup",
            "/media",
            vec![clip(1, "dog", vec![0.0]), clip(1, "cat", vec![1.0])],
        );
        assert!(matches!(result, Err(Error::InvalidDataset { .. })));
    }

    #[test]
    fn test_media_path_joins_root_and_filename() {
        let ds = Dataset::new("a", "/srv/audio", vec![clip(3, "dog", vec![1.0])]).unwrap();
        let c = ds.get(3).unwrap();
        assert_eq!(ds.media_path(c), PathBuf::from("/srv/audio/clip_3.wav"));
        assert_eq!(ds.embedding_dim(), Some(1));
    }

    #[test]
    fn test_file_accepts_audio_dir_alias_and_string_keys() {
        let json = r#"{
            "audio_dir": "audio",
            "clips": {
                "2": {"category": "cat", "duration": 1.5, "file_size": 10,
                      "embedding": [0.5, 0.25], "filename": "cat.wav"}
            }
        }"#;
        let file: DatasetFile = serde_json::from_str(json).unwrap();
        let ds = file.into_dataset("pets", Path::new("/data/embeddings")).unwrap();

        assert_eq!(ds.media_root(), Path::new("/data/embeddings/audio"));
        assert_eq!(ds.get(2).unwrap().embedding, vec![0.5, 0.25]);
    }

    #[test]
    fn test_save_then_load_preserves_exact_floats() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path());
        let embedding = vec![0.1f32, -1.0e-7, 3.402_823_5e38, 0.333_333_34];
        let ds = Dataset::new("exact", "/abs/media", vec![clip(1, "x", embedding.clone())]).unwrap();

        source.save("exact", &ds.to_file()).unwrap();
        let loaded = source.load("exact").unwrap();

        assert_eq!(loaded, ds);
        assert_eq!(loaded.get(1).unwrap().embedding, embedding);
    }

    #[test]
    fn test_discover_lists_only_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.json"), "{}").unwrap();
        std::fs::write(dir.path().join("alpha.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names = JsonDirSource::new(dir.path()).discover().unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_discover_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path().join("missing"));
        assert!(matches!(source.discover(), Err(Error::NotFound(_))));
    }
}
