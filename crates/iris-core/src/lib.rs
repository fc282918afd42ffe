//! Iris Core
//!
//! Core types and error handling shared across the iris classification
//! service crates.
//!
//! This crate provides:
//! - The error taxonomy for artifact loading and prediction
//! - The fixed-shape feature vector accepted by every classifier
//! - Model variant selection and the prediction result type

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeatureVector, ModelVariant, Prediction, FEATURE_COUNT, FEATURE_NAMES};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeatureVector, ModelVariant, Prediction};
}
