//! Decision tree classifier

use crate::classifier::Classifier;
use iris_core::{Error, ModelVariant, Result};
use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, ArrayView1, Axis, Ix1};
use serde::{Deserialize, Serialize};

/// Gini decision tree grown until its leaves are pure
///
/// linfa only exposes hard predictions for trees. With pure leaves the class
/// distribution at a leaf is degenerate, so probabilities are reported as the
/// one-hot vector of the predicted label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeModel {
    tree: DecisionTree<f64, usize>,
    n_features: usize,
    n_classes: usize,
}

impl TreeModel {
    /// Fit on a labelled dataset
    pub fn fit(dataset: &Dataset<f64, usize, Ix1>) -> Result<Self> {
        let n_classes = dataset
            .targets()
            .iter()
            .copied()
            .max()
            .map_or(0, |max| max + 1);

        let tree = DecisionTree::params()
            .fit(dataset)
            .map_err(|e| Error::training(format!("decision tree fit failed: {}", e)))?;

        Ok(Self {
            tree,
            n_features: dataset.records().ncols(),
            n_classes,
        })
    }

    /// Predict labels for many samples at once
    pub fn predict_batch(&self, records: &Array2<f64>) -> Array1<usize> {
        self.tree.predict(records)
    }

    /// Size of the label space seen during training
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

impl Classifier for TreeModel {
    fn classify(&self, features: ArrayView1<'_, f64>) -> Result<usize> {
        if features.len() != self.n_features {
            return Err(Error::prediction(format!(
                "decision tree expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let records = features.to_owned().insert_axis(Axis(0));
        self.predict_batch(&records)
            .get(0)
            .copied()
            .ok_or_else(|| Error::prediction("decision tree returned no label"))
    }

    fn classify_proba(&self, features: ArrayView1<'_, f64>) -> Result<Vec<f64>> {
        let label = self.classify(features)?;
        if label >= self.n_classes {
            return Err(Error::prediction(format!(
                "decision tree predicted label {} outside its {} classes",
                label, self.n_classes
            )));
        }

        let mut distribution = vec![0.0; self.n_classes];
        distribution[label] = 1.0;
        Ok(distribution)
    }

    fn variant(&self) -> ModelVariant {
        ModelVariant::DecisionTree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_one_hot_distribution() {
        let model = TreeModel::fit(&linfa_datasets::iris()).unwrap();
        assert_eq!(model.n_classes(), 3);

        let x = array![6.7, 3.0, 5.2, 2.3];
        let label = model.classify(x.view()).unwrap();
        let proba = model.classify_proba(x.view()).unwrap();
        assert_eq!(label, 2);
        assert_eq!(proba, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_fits_training_data() {
        let iris = linfa_datasets::iris();
        let model = TreeModel::fit(&iris).unwrap();
        let predicted = model.predict_batch(iris.records());
        let correct = predicted
            .iter()
            .zip(iris.targets().iter())
            .filter(|(p, t)| p == t)
            .count();
        assert!(correct as f64 / iris.records().nrows() as f64 > 0.95);
    }
}
