//! On-disk artifact layout shared by the training job and the service

use iris_core::{Error, ModelVariant, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fitted feature scaler
pub const SCALER_FILE: &str = "scaler.json";

/// Fitted logistic regression
pub const LOGISTIC_FILE: &str = "logistic_regression.json";

/// Fitted decision tree
pub const DECISION_TREE_FILE: &str = "decision_tree.json";

/// Label to species names
pub const SPECIES_FILE: &str = "species.json";

/// Default artifact directory, relative to the working directory
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Artifact file holding the given model variant
pub fn model_file(variant: ModelVariant) -> &'static str {
    match variant {
        ModelVariant::DecisionTree => DECISION_TREE_FILE,
        ModelVariant::Logistic => LOGISTIC_FILE,
    }
}

/// Directory of JSON-encoded artifacts
///
/// Files carry no version tag. Compatibility is by convention: same crate
/// versions, same feature order.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of an artifact file
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Whether an artifact file is present
    pub fn exists(&self, file: &str) -> bool {
        self.path(file).is_file()
    }

    /// Read and decode one artifact
    pub fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        debug!(path = %path.display(), "Reading artifact");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::load_failure(path.display().to_string(), e))?;

        serde_json::from_str(&content).map_err(|e| Error::load_failure(path.display().to_string(), e))
    }

    /// Encode an artifact without touching the filesystem
    pub fn encode<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Write pre-encoded artifacts, creating the directory if absent
    pub fn write_all(&self, artifacts: &[(&str, String)]) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir)?;

        let mut written = Vec::with_capacity(artifacts.len());
        for (file, content) in artifacts {
            let path = self.path(file);
            std::fs::write(&path, content)?;
            debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::SpeciesMap;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("nested"));

        let encoded = ArtifactStore::encode(&SpeciesMap::iris()).unwrap();
        let written = store.write_all(&[(SPECIES_FILE, encoded)]).unwrap();

        assert_eq!(written, vec![store.path(SPECIES_FILE)]);
        assert!(store.exists(SPECIES_FILE));
        let map: SpeciesMap = store.read(SPECIES_FILE).unwrap();
        assert_eq!(map, SpeciesMap::iris());
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let err = store.read::<SpeciesMap>(SCALER_FILE).unwrap_err();
        assert_eq!(err.kind(), "load_failure");
    }

    #[test]
    fn test_corrupt_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        std::fs::write(store.path(SPECIES_FILE), "not json").unwrap();

        let err = store.read::<SpeciesMap>(SPECIES_FILE).unwrap_err();
        assert!(matches!(err, Error::LoadFailure { .. }));
    }

    #[test]
    fn test_model_files() {
        assert_eq!(model_file(ModelVariant::Logistic), "logistic_regression.json");
        assert_eq!(model_file(ModelVariant::DecisionTree), "decision_tree.json");
    }
}
