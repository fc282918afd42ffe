//! Error types for the iris classification service

use crate::types::FEATURE_NAMES;

/// Result type alias using the service's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for loading and prediction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Feature vector has the wrong number of values
    #[error("Expected {expected} features: {}", FEATURE_NAMES.join(", "))]
    InvalidInput { expected: usize, got: usize },

    /// Requested model variant is unknown or was not loaded
    #[error("Model '{requested}' not available. Choose from: [{}]", .available.join(", "))]
    UnknownModel {
        requested: String,
        available: Vec<String>,
    },

    /// A co-artifact required by the selected model is absent
    #[error("{0} not loaded")]
    MissingDependency(String),

    /// Classifier produced a label outside the species mapping
    #[error("Prediction error: label {0} has no species mapping")]
    UnmappedLabel(usize),

    /// Any other failure while running inference
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Artifact could not be deserialized at startup
    #[error("failed to load {artifact}: {reason}")]
    LoadFailure { artifact: String, reason: String },

    /// Training job errors
    #[error("training error: {0}")]
    Training(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact encoding errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a new missing dependency error
    pub fn missing_dependency(what: impl Into<String>) -> Self {
        Self::MissingDependency(what.into())
    }

    /// Create a new load failure for the named artifact
    pub fn load_failure(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Self::LoadFailure {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new training error
    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    /// Stable snake_case name, used in error bodies and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnknownModel { .. } => "unknown_model",
            Self::MissingDependency(_) => "missing_dependency",
            Self::UnmappedLabel(_) => "unmapped_label",
            Self::Prediction(_) => "prediction_error",
            Self::LoadFailure { .. } => "load_failure",
            Self::Training(_) => "training_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the caller is at fault (bad input or model selection)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownModel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_expected_features() {
        let err = Error::InvalidInput {
            expected: 4,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "Expected 4 features: sepal_length, sepal_width, petal_length, petal_width"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unknown_model_lists_available() {
        let err = Error::UnknownModel {
            requested: "svm".to_string(),
            available: vec!["decision_tree".to_string(), "logistic".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Model 'svm' not available. Choose from: [decision_tree, logistic]"
        );
        assert_eq!(err.kind(), "unknown_model");
    }

    #[test]
    fn test_server_side_errors() {
        let err = Error::missing_dependency("Scaler");
        assert_eq!(err.to_string(), "Scaler not loaded");
        assert!(!err.is_client_error());

        assert!(!Error::UnmappedLabel(7).is_client_error());
        assert_eq!(Error::prediction("boom").to_string(), "Prediction error: boom");
    }
}
