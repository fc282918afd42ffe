//! Shared application state

use crate::config::ServerConfig;
use iris_classifiers::ModelRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Models loaded at startup, read-only afterwards
    pub registry: Arc<ModelRegistry>,

    /// Prometheus handle for rendering `/metrics`, when an exporter is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        registry: ModelRegistry,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            metrics_handle,
        }
    }

    /// Initialize application state, loading models from the configured directory
    ///
    /// Missing or corrupt artifacts leave the registry degraded; the service
    /// still starts.
    pub fn load(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Self {
        info!("Loading models from: {}", config.models_dir.display());
        let registry = ModelRegistry::load(&config.models_dir);
        info!("Loaded {} models", registry.len());

        Self::new(config, registry, metrics_handle)
    }
}
