//! Dataset registry
//!
//! Holds every dataset loaded at startup, keyed by name. Loading is
//! fail-soft: a source that cannot be read is logged and skipped, and an
//! empty registry is a valid (degraded) state.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::dataset::{Dataset, DatasetSource};

/// Catalog entry for one loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub clip_count: usize,
}

/// All datasets known to the process
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    datasets: BTreeMap<String, Arc<Dataset>>,
}

impl DatasetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already constructed datasets
    ///
    /// Later datasets replace earlier ones with the same name.
    pub fn from_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Self {
        let datasets = datasets
            .into_iter()
            .map(|ds| (ds.name().to_string(), Arc::new(ds)))
            .collect();
        Self { datasets }
    }

    /// Discover and load every dataset a source offers
    ///
    /// Never fails: unreadable sources are skipped with a warning.
    pub fn load_all(source: &dyn DatasetSource) -> Self {
        let mut registry = Self::new();

        let names = match source.discover() {
            Ok(names) => names,
            Err(e) => {
                warn!("Dataset discovery failed: {}", e);
                return registry;
            }
        };

        for name in names {
            info!("Loading dataset: {}", name);
            match source.load(&name) {
                Ok(dataset) => {
                    info!(
                        dataset = %name,
                        clips = dataset.len(),
                        embedding_dim = ?dataset.embedding_dim(),
                        "Loaded dataset"
                    );
                    registry.datasets.insert(name, Arc::new(dataset));
                }
                Err(e) => {
                    warn!("Skipping dataset '{}': {}", name, e);
                }
            }
        }

        if registry.is_empty() {
            warn!("No datasets loaded");
        }

        registry
    }

    /// Catalog of loaded datasets, ordered by name
    pub fn list(&self) -> Vec<DatasetInfo> {
        self.datasets
            .values()
            .map(|ds| DatasetInfo {
                name: ds.name().to_string(),
                clip_count: ds.len(),
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Dataset>> {
        self.datasets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    /// Name of the first dataset in catalog order
    pub fn first_name(&self) -> Option<&str> {
        self.datasets.keys().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clip;
    use crate::dataset::JsonDirSource;
    use crate::{Error, Result};

    fn dataset(name: &str, ids: &[u64]) -> Dataset {
        let clips = ids.iter().map(|&id| Clip {
            id,
            category: "dog".to_string(),
            duration: 1.0,
            file_size: 10,
            embedding: vec![id as f32, 0.0],
            filename: format!("{}.wav", id),
        });
        Dataset::new(name, "/media", clips).unwrap()
    }

    /// Source whose discovery itself fails
    struct BrokenSource;

    impl DatasetSource for BrokenSource {
        fn discover(&self) -> Result<Vec<String>> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }

        fn load(&self, name: &str) -> Result<Dataset> {
            Err(Error::NotFound(name.to_string()))
        }
    }

    #[test]
    fn test_list_is_sorted_with_clip_counts() {
        let registry =
            DatasetRegistry::from_datasets(vec![dataset("sounds_m", &[1, 2, 3]), dataset("animals", &[1])]);

        assert_eq!(
            registry.list(),
            vec![
                DatasetInfo { name: "animals".to_string(), clip_count: 1 },
                DatasetInfo { name: "sounds_m".to_string(), clip_count: 3 },
            ]
        );
        assert_eq!(registry.first_name(), Some("animals"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_load_all_skips_corrupt_sources() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path());
        source.save("good", &dataset("good", &[1, 2]).to_file()).unwrap();
        std::fs::write(dir.path().join("corrupt.json"), b"{not json").unwrap();

        let registry = DatasetRegistry::load_all(&source);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("good"));
        assert!(!registry.contains("corrupt"));
    }

    #[test]
    fn test_load_all_with_failed_discovery_is_empty() {
        let registry = DatasetRegistry::load_all(&BrokenSource);
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
        assert_eq!(registry.first_name(), None);
    }
}
