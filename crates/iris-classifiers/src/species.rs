//! Label to species name mapping

use iris_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Species names of the iris dataset, in label order
pub const IRIS_SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Display names for class labels, indexed by label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesMap {
    species: Vec<String>,
}

impl SpeciesMap {
    pub fn new(species: Vec<String>) -> Self {
        Self { species }
    }

    /// Mapping of the canonical iris label encoding
    pub fn iris() -> Self {
        Self::new(IRIS_SPECIES.iter().map(|s| s.to_string()).collect())
    }

    /// Display name for a label
    pub fn name(&self, label: usize) -> Result<&str> {
        self.species
            .get(label)
            .map(String::as_str)
            .ok_or(Error::UnmappedLabel(label))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Default for SpeciesMap {
    fn default() -> Self {
        Self::iris()
    }
}
