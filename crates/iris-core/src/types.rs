//! Core types for iris classification

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of values in every feature vector
pub const FEATURE_COUNT: usize = 4;

/// Feature names, in the order classifiers expect them
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Measurements of a single flower specimen
///
/// Only the count is validated. Values are taken as-is, including negative,
/// zero and biologically implausible ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a feature vector from a slice, rejecting any other length
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| Error::InvalidInput {
                expected: FEATURE_COUNT,
                got: values.len(),
            })?;
        Ok(Self(values))
    }

    /// Borrow the raw values
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Copy out the raw values
    pub fn to_array(self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Classifier variants the service can hold
///
/// Variant order is the listing order of loaded models.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Tree-based classifier, fed raw features
    DecisionTree,
    /// Linear classifier, fed scaled features
    #[default]
    Logistic,
}

impl ModelVariant {
    /// All variants in listing order
    pub const ALL: [ModelVariant; 2] = [ModelVariant::DecisionTree, ModelVariant::Logistic];

    /// Selector string used in requests and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecisionTree => "decision_tree",
            Self::Logistic => "logistic",
        }
    }

    /// Look up a variant by its selector string
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }

    /// Whether inputs must pass through the feature scaler first
    pub fn requires_scaler(&self) -> bool {
        matches!(self, Self::Logistic)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label
    pub prediction: usize,

    /// Probability per class, indexed by label
    pub probabilities: Vec<f64>,

    /// Display name of the predicted class
    pub predicted_species: String,

    /// Variant that produced this prediction
    pub model_used: String,

    /// Largest value in `probabilities`
    pub confidence: f64,
}

impl Prediction {
    /// Create a prediction, deriving confidence from the distribution
    pub fn new(
        label: usize,
        probabilities: Vec<f64>,
        species: impl Into<String>,
        variant: ModelVariant,
    ) -> Self {
        let confidence = probabilities
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            prediction: label,
            probabilities,
            predicted_species: species.into(),
            model_used: variant.as_str().to_string(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_feature_vector_from_exact_slice() {
        let fv = FeatureVector::from_slice(&[5.1, 3.5, 1.4, 0.2]).unwrap();
        assert_eq!(fv.to_array(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn test_feature_vector_accepts_out_of_range_values() {
        let fv = FeatureVector::try_from(vec![-1.0, 0.0, 1e9, -0.0]).unwrap();
        assert_eq!(fv.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(ModelVariant::from_name("logistic"), Some(ModelVariant::Logistic));
        assert_eq!(
            ModelVariant::from_name("decision_tree"),
            Some(ModelVariant::DecisionTree)
        );
        assert_eq!(ModelVariant::from_name("Logistic"), None);
        assert_eq!(ModelVariant::default(), ModelVariant::Logistic);
        assert!(ModelVariant::Logistic.requires_scaler());
        assert!(!ModelVariant::DecisionTree.requires_scaler());
    }

    #[test]
    fn test_prediction_confidence_is_max_probability() {
        let p = Prediction::new(1, vec![0.1, 0.7, 0.2], "versicolor", ModelVariant::Logistic);
        assert_eq!(p.confidence, 0.7);
        assert_eq!(p.model_used, "logistic");
    }

    proptest! {
        #[test]
        fn prop_wrong_length_is_invalid_input(values in prop::collection::vec(any::<f64>(), 0..16)) {
            prop_assume!(values.len() != FEATURE_COUNT);
            let got = values.len();
            match FeatureVector::try_from(values) {
                Err(Error::InvalidInput { expected, got: reported }) => {
                    prop_assert_eq!(expected, FEATURE_COUNT);
                    prop_assert_eq!(reported, got);
                }
                other => prop_assert!(false, "unexpected result: {:?}", other),
            }
        }
    }
}
