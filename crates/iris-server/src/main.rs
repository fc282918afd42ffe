//! Iris Server
//!
//! Loads the trained classifiers once at startup and serves predictions over
//! HTTP until interrupted.

use anyhow::Result;
use clap::Parser;
use iris_server::{run_server, AppState, Cli, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting {}", iris_server::SERVICE_NAME);

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Models directory: {}", config.models_dir.display());

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load models; a missing or corrupt artifact degrades the registry instead of aborting
    let addr = config.socket_addr()?;
    let state = AppState::load(config, Some(metrics_handle));
    info!(
        "Available models: {:?}",
        state.registry.model_names()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    run_server(state, listener, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("iris=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iris=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!("iris_requests_total", "Total number of requests by endpoint");
    metrics::describe_counter!(
        "iris_predictions_total",
        "Total number of successful predictions by model"
    );
    metrics::describe_counter!(
        "iris_prediction_errors_total",
        "Total number of failed predictions by error kind"
    );
    metrics::describe_histogram!(
        "iris_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Prediction latency in microseconds by model"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
