//! Iris Server
//!
//! HTTP surface for the iris classifiers: service metadata, health, and a
//! single prediction endpoint backed by an immutable model registry.

pub mod app;
pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use app::{build_app, run_server};
pub use cli::Cli;
pub use config::{CorsConfig, ServerConfig};
pub use state::AppState;

/// Service name reported by `GET /`
pub const SERVICE_NAME: &str = "IRIS Classification API";
