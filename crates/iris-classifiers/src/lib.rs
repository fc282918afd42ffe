//! Iris Classifiers
//!
//! Classical classifiers for iris species prediction, built on linfa.
//!
//! Two interchangeable variants are supported:
//! - `logistic`: multinomial logistic regression over standardized features
//! - `decision_tree`: Gini decision tree over raw features
//!
//! Models are produced offline by [`training::run`], persisted as JSON
//! artifacts, and loaded once into an immutable [`ModelRegistry`].

pub mod artifacts;
pub mod classifier;
pub mod linear;
pub mod registry;
pub mod scaler;
pub mod species;
pub mod training;
pub mod tree;

pub use artifacts::ArtifactStore;
pub use classifier::{Classifier, TrainedModel};
pub use linear::LogisticModel;
pub use registry::ModelRegistry;
pub use scaler::StandardScaler;
pub use species::SpeciesMap;
pub use training::{TrainedArtifacts, TrainingReport};
pub use tree::TreeModel;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, TrainedModel};
    pub use crate::registry::ModelRegistry;
    pub use crate::scaler::StandardScaler;
    pub use crate::species::SpeciesMap;
    pub use iris_core::prelude::*;
}
