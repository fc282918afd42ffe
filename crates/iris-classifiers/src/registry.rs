//! Immutable model registry loaded once at startup

use crate::artifacts::{self, ArtifactStore, SCALER_FILE, SPECIES_FILE};
use crate::classifier::{Classifier, TrainedModel};
use crate::linear::LogisticModel;
use crate::scaler::StandardScaler;
use crate::species::SpeciesMap;
use crate::tree::TreeModel;
use iris_core::{Error, FeatureVector, ModelVariant, Prediction, Result};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Registry of loaded classifiers and their co-artifacts
///
/// Built once, then only read. Share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    /// Loaded classifiers by variant
    models: BTreeMap<ModelVariant, TrainedModel>,

    /// Scaler required by the linear variant
    scaler: Option<StandardScaler>,

    /// Label display names
    species: SpeciesMap,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every artifact found in `dir`
    ///
    /// Never fails. Each artifact is attempted on its own; failures are
    /// logged and leave the registry partial or empty, so that later
    /// predictions report what is missing.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let store = ArtifactStore::new(dir.as_ref());
        info!(dir = %store.dir().display(), "Loading model artifacts");

        let mut registry = Self::new();

        for variant in ModelVariant::ALL {
            let file = artifacts::model_file(variant);
            let loaded = match variant {
                ModelVariant::DecisionTree => store.read::<TreeModel>(file).map(TrainedModel::from),
                ModelVariant::Logistic => store.read::<LogisticModel>(file).map(TrainedModel::from),
            };

            match loaded {
                Ok(model) => {
                    info!(model = %variant, "✓ Loaded model");
                    registry.models.insert(variant, model);
                }
                Err(e) => {
                    warn!(model = %variant, error = %e, "✗ Failed to load model");
                }
            }
        }

        match store.read::<StandardScaler>(SCALER_FILE) {
            Ok(scaler) => {
                info!(features = scaler.n_features(), "✓ Loaded scaler");
                registry.scaler = Some(scaler);
            }
            Err(e) => warn!(error = %e, "✗ Failed to load scaler"),
        }

        if store.exists(SPECIES_FILE) {
            match store.read::<SpeciesMap>(SPECIES_FILE) {
                Ok(species) if species.is_empty() => {
                    warn!("Species map is empty, using built-in iris species names");
                }
                Ok(species) => {
                    info!(classes = species.len(), "✓ Loaded species map");
                    registry.species = species;
                }
                Err(e) => warn!(error = %e, "✗ Failed to load species map, using built-in names"),
            }
        } else {
            info!("No species map found, using built-in iris species names");
        }

        if registry.is_empty() {
            warn!("No models loaded; run the training job first to generate artifacts");
        }

        info!(
            "Model registry initialized with {}/{} models: {:?}",
            registry.len(),
            ModelVariant::ALL.len(),
            registry.model_names()
        );

        registry
    }

    /// Add or replace a classifier
    pub fn with_model(mut self, model: impl Into<TrainedModel>) -> Self {
        let model = model.into();
        self.models.insert(model.variant(), model);
        self
    }

    /// Set the feature scaler
    pub fn with_scaler(mut self, scaler: StandardScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    /// Set the label display names
    pub fn with_species(mut self, species: SpeciesMap) -> Self {
        self.species = species;
        self
    }

    /// Get the number of loaded classifiers
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Names of the loaded variants, in listing order
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().map(|v| v.as_str().to_string()).collect()
    }

    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn species(&self) -> &SpeciesMap {
        &self.species
    }

    /// Classify one sample with the named variant
    pub fn predict(&self, features: &[f64], model_type: &str) -> Result<Prediction> {
        let features = FeatureVector::from_slice(features)?;
        let (variant, model) = self.select(model_type)?;
        let input = self.prepare(variant, &features)?;

        let label = model.classify(input.view())?;
        let probabilities = model.classify_proba(input.view())?;
        if probabilities.get(label).is_none() {
            return Err(Error::prediction(format!(
                "label {} outside the {} returned probabilities",
                label,
                probabilities.len()
            )));
        }

        let species = self.species.name(label)?;
        debug!(model = %variant, label, species, "Prediction complete");

        Ok(Prediction::new(label, probabilities, species, variant))
    }

    fn select(&self, model_type: &str) -> Result<(ModelVariant, &TrainedModel)> {
        ModelVariant::from_name(model_type)
            .and_then(|variant| self.models.get(&variant).map(|model| (variant, model)))
            .ok_or_else(|| Error::UnknownModel {
                requested: model_type.to_string(),
                available: self.model_names(),
            })
    }

    /// Raw features for the tree, scaled features for the linear model
    fn prepare(&self, variant: ModelVariant, features: &FeatureVector) -> Result<Array1<f64>> {
        let raw = Array1::from(features.to_array().to_vec());
        if !variant.requires_scaler() {
            return Ok(raw);
        }

        let scaler = self
            .scaler
            .as_ref()
            .ok_or_else(|| Error::missing_dependency("Scaler"))?;
        scaler.transform(raw.view())
    }
}
