//! Classifier trait and the closed set of trained models

use crate::linear::LogisticModel;
use crate::tree::TreeModel;
use iris_core::{ModelVariant, Result};
use ndarray::ArrayView1;

/// Trait for all trained classifiers
pub trait Classifier: Send + Sync {
    /// Predict the class label of one sample
    fn classify(&self, features: ArrayView1<'_, f64>) -> Result<usize>;

    /// Probability of each class for one sample, indexed by label
    fn classify_proba(&self, features: ArrayView1<'_, f64>) -> Result<Vec<f64>>;

    /// Variant this classifier is registered under
    fn variant(&self) -> ModelVariant;
}

/// A trained model of either supported variant
#[derive(Debug, Clone)]
pub enum TrainedModel {
    Logistic(LogisticModel),
    DecisionTree(TreeModel),
}

impl TrainedModel {
    /// Borrow the model as a trait object
    pub fn as_classifier(&self) -> &dyn Classifier {
        match self {
            Self::Logistic(model) => model,
            Self::DecisionTree(model) => model,
        }
    }
}

impl Classifier for TrainedModel {
    fn classify(&self, features: ArrayView1<'_, f64>) -> Result<usize> {
        self.as_classifier().classify(features)
    }

    fn classify_proba(&self, features: ArrayView1<'_, f64>) -> Result<Vec<f64>> {
        self.as_classifier().classify_proba(features)
    }

    fn variant(&self) -> ModelVariant {
        self.as_classifier().variant()
    }
}

impl From<LogisticModel> for TrainedModel {
    fn from(model: LogisticModel) -> Self {
        Self::Logistic(model)
    }
}

impl From<TreeModel> for TrainedModel {
    fn from(model: TreeModel) -> Self {
        Self::DecisionTree(model)
    }
}
