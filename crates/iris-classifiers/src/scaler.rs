//! Per-feature standardization

use iris_core::{Error, Result};
use linfa::prelude::*;
use linfa_preprocessing::linear_scaling::LinearScaler;
use ndarray::{Array1, Array2, ArrayView1, Axis, Ix1};
use serde::{Deserialize, Serialize};

/// Standardizes features to zero mean and unit variance
///
/// Wraps linfa's standard `LinearScaler`, fitted once on the training
/// partition. The wrapper checks input width, since linfa panics on a
/// mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    scaler: LinearScaler<f64>,
}

impl StandardScaler {
    /// Learn per-feature offsets and scales from the training records
    pub fn fit(dataset: &Dataset<f64, usize, Ix1>) -> Result<Self> {
        if dataset.records().nrows() == 0 {
            return Err(Error::training("cannot fit scaler on an empty dataset"));
        }

        let scaler = LinearScaler::standard()
            .fit(dataset)
            .map_err(|e| Error::training(format!("scaler fit failed: {}", e)))?;

        Ok(Self { scaler })
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.scaler.offsets().len()
    }

    /// Value subtracted from each feature
    pub fn offsets(&self) -> &Array1<f64> {
        self.scaler.offsets()
    }

    /// Factor each centered feature is multiplied by
    pub fn scales(&self) -> &Array1<f64> {
        self.scaler.scales()
    }

    /// Scale a single sample
    pub fn transform(&self, features: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        let records = self.transform_records(&features.to_owned().insert_axis(Axis(0)))?;
        Ok(records.row(0).to_owned())
    }

    /// Scale every row of a record matrix
    pub fn transform_records(&self, records: &Array2<f64>) -> Result<Array2<f64>> {
        if records.ncols() != self.n_features() {
            return Err(Error::prediction(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                records.ncols()
            )));
        }
        Ok(self.scaler.transform(records.to_owned()))
    }

    /// Scale the records of a labelled dataset, keeping its targets
    pub fn transform_dataset(
        &self,
        dataset: &Dataset<f64, usize, Ix1>,
    ) -> Result<Dataset<f64, usize, Ix1>> {
        Ok(Dataset::new(
            self.transform_records(dataset.records())?,
            dataset.targets().clone(),
        ))
    }
}
