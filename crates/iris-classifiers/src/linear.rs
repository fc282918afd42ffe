//! Multinomial logistic regression classifier

use crate::classifier::Classifier;
use iris_core::{Error, ModelVariant, Result};
use linfa::prelude::*;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2, ArrayView1, Axis, Ix1};
use serde::{Deserialize, Serialize};

/// Optimizer iteration cap
const MAX_ITERATIONS: u64 = 200;

/// Linear classifier over standardized features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    model: MultiFittedLogisticRegression<f64, usize>,
    n_features: usize,
}

impl LogisticModel {
    /// Fit on a labelled dataset whose records are already scaled
    pub fn fit(dataset: &Dataset<f64, usize, Ix1>) -> Result<Self> {
        let model = MultiLogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(dataset)
            .map_err(|e| Error::training(format!("logistic regression fit failed: {}", e)))?;

        Ok(Self {
            model,
            n_features: dataset.records().ncols(),
        })
    }

    /// Predict labels for many samples at once
    pub fn predict_batch(&self, records: &Array2<f64>) -> Array1<usize> {
        self.model.predict(records)
    }

    /// Class labels seen during training
    pub fn classes(&self) -> &[usize] {
        self.model.classes()
    }

    fn records(&self, features: ArrayView1<'_, f64>) -> Result<Array2<f64>> {
        if features.len() != self.n_features {
            return Err(Error::prediction(format!(
                "logistic model expects {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        Ok(features.to_owned().insert_axis(Axis(0)))
    }
}

impl Classifier for LogisticModel {
    fn classify(&self, features: ArrayView1<'_, f64>) -> Result<usize> {
        let records = self.records(features)?;
        self.predict_batch(&records)
            .get(0)
            .copied()
            .ok_or_else(|| Error::prediction("logistic model returned no label"))
    }

    fn classify_proba(&self, features: ArrayView1<'_, f64>) -> Result<Vec<f64>> {
        let records = self.records(features)?;
        let probabilities = self.model.predict_probabilities(&records);
        if probabilities.nrows() != 1 || probabilities.ncols() != self.classes().len() {
            return Err(Error::prediction(format!(
                "logistic model returned probabilities of shape {:?}",
                probabilities.shape()
            )));
        }

        // Columns follow the fitted class order; re-index them by label.
        let n_labels = self.classes().iter().max().map_or(0, |max| max + 1);
        let mut distribution = vec![0.0; n_labels];
        for (&class, &p) in self.classes().iter().zip(probabilities.row(0).iter()) {
            distribution[class] = p;
        }
        Ok(distribution)
    }

    fn variant(&self) -> ModelVariant {
        ModelVariant::Logistic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::StandardScaler;
    use ndarray::array;

    fn fitted() -> (StandardScaler, LogisticModel) {
        let iris = linfa_datasets::iris();
        let scaler = StandardScaler::fit(&iris).unwrap();
        let scaled = scaler.transform_dataset(&iris).unwrap();
        (scaler, LogisticModel::fit(&scaled).unwrap())
    }

    #[test]
    fn test_distribution_is_indexed_by_label() {
        let (scaler, model) = fitted();
        assert_eq!(model.classes(), &[0, 1, 2]);

        let x = scaler.transform(array![5.1, 3.5, 1.4, 0.2].view()).unwrap();
        let proba = model.classify_proba(x.view()).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(model.classify(x.view()).unwrap(), 0);
        assert!(proba[0] > 0.9);
    }

    #[test]
    fn test_rejects_wrong_width() {
        let (_, model) = fitted();
        let err = model.classify(array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(err, Error::Prediction(_)));
    }
}
