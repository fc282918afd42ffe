//! Offline training job
//!
//! Loads the iris dataset, splits it reproducibly, fits the scaler and both
//! classifiers, reports test accuracy and exports every artifact. Accuracy is
//! diagnostic only and never gates the export.

use crate::artifacts::{
    ArtifactStore, DECISION_TREE_FILE, LOGISTIC_FILE, SCALER_FILE, SPECIES_FILE,
};
use crate::linear::LogisticModel;
use crate::registry::ModelRegistry;
use crate::scaler::StandardScaler;
use crate::species::SpeciesMap;
use crate::tree::TreeModel;
use iris_core::{Error, Result};
use linfa::prelude::*;
use ndarray::{Array1, Ix1};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Seed for the train/test shuffle
pub const SEED: u64 = 42;

/// Share of samples used for training
pub const TRAIN_RATIO: f32 = 0.8;

/// Summary of one training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub train_samples: usize,
    pub test_samples: usize,
    pub logistic_accuracy: f32,
    pub decision_tree_accuracy: f32,
    /// Files written by [`run`]; empty until the artifacts are saved
    pub written: Vec<PathBuf>,
}

/// Everything produced by a training run, not yet persisted
#[derive(Debug, Clone)]
pub struct TrainedArtifacts {
    pub scaler: StandardScaler,
    pub logistic: LogisticModel,
    pub decision_tree: TreeModel,
    pub species: SpeciesMap,
    pub report: TrainingReport,
}

impl TrainedArtifacts {
    /// Encode all artifacts, then write them into `dir`
    ///
    /// Nothing is written unless every artifact encoded successfully.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let encoded = [
            (SCALER_FILE, ArtifactStore::encode(&self.scaler)?),
            (LOGISTIC_FILE, ArtifactStore::encode(&self.logistic)?),
            (DECISION_TREE_FILE, ArtifactStore::encode(&self.decision_tree)?),
            (SPECIES_FILE, ArtifactStore::encode(&self.species)?),
        ];

        ArtifactStore::new(dir.as_ref()).write_all(&encoded)
    }

    /// Build a registry directly from the in-memory artifacts
    pub fn into_registry(self) -> ModelRegistry {
        ModelRegistry::new()
            .with_model(self.logistic)
            .with_model(self.decision_tree)
            .with_scaler(self.scaler)
            .with_species(self.species)
    }
}

/// Fit the scaler and both classifiers
pub fn train() -> Result<TrainedArtifacts> {
    let dataset = linfa_datasets::iris();
    info!(
        samples = dataset.records().nrows(),
        features = dataset.records().ncols(),
        "Data loaded successfully"
    );

    let mut rng = StdRng::seed_from_u64(SEED);
    let (train, test) = dataset.shuffle(&mut rng).split_with_ratio(TRAIN_RATIO);

    let scaler = StandardScaler::fit(&train)?;
    let train = scaler.transform_dataset(&train)?;
    let test = scaler.transform_dataset(&test)?;

    let logistic = LogisticModel::fit(&train)?;
    let logistic_accuracy = accuracy(&logistic.predict_batch(test.records()), &test)?;
    info!("Logistic Regression Accuracy: {:.4}", logistic_accuracy);

    let decision_tree = TreeModel::fit(&train)?;
    let decision_tree_accuracy = accuracy(&decision_tree.predict_batch(test.records()), &test)?;
    info!("Decision Tree Accuracy: {:.4}", decision_tree_accuracy);

    let report = TrainingReport {
        train_samples: train.records().nrows(),
        test_samples: test.records().nrows(),
        logistic_accuracy,
        decision_tree_accuracy,
        written: Vec::new(),
    };

    Ok(TrainedArtifacts {
        scaler,
        logistic,
        decision_tree,
        species: SpeciesMap::iris(),
        report,
    })
}

/// Train and export every artifact into `output_dir`
pub fn run(output_dir: impl AsRef<Path>) -> Result<TrainingReport> {
    let output_dir = output_dir.as_ref();
    let artifacts = train()?;

    let written = artifacts.save(output_dir)?;
    info!(
        files = written.len(),
        "Models and scaler exported to {}",
        output_dir.display()
    );

    Ok(TrainingReport {
        written,
        ..artifacts.report
    })
}

fn accuracy(predicted: &Array1<usize>, test: &Dataset<f64, usize, Ix1>) -> Result<f32> {
    let cm = predicted
        .confusion_matrix(test)
        .map_err(|e| Error::training(format!("accuracy computation failed: {}", e)))?;
    Ok(cm.accuracy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let report = train().unwrap().report;
        assert_eq!(report.train_samples, 120);
        assert_eq!(report.test_samples, 30);
        assert!(report.written.is_empty());
    }
}
