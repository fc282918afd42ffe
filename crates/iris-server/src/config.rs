//! Server configuration

use crate::cli::Cli;
use anyhow::Context;
use iris_classifiers::artifacts::DEFAULT_MODELS_DIR;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the trained model artifacts
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).is_file() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Invalid config file {}", config_path))?
        } else {
            Self::default()
        };

        config.apply_overrides(cli);
        Ok(config)
    }

    /// Parse configuration from YAML, filling in defaults
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }

        if let Some(models_dir) = &cli.models_dir {
            self.models_dir = models_dir.clone();
        }
    }

    /// Address to bind the listener to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            models_dir: default_models_dir(),
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Accept requests from any origin
    #[serde(default = "default_true")]
    pub allow_any_origin: bool,

    /// Origins accepted when `allow_any_origin` is off
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
            allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_models_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_DIR)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert!(config.cors.allow_any_origin);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
port: 9000
cors:
  allow_any_origin: false
  allowed_origins:
    - http://localhost:3000
"#;
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(!config.cors.allow_any_origin);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris-server.yaml");
        std::fs::write(&path, "host: 127.0.0.1\nport: 9000\nmodels_dir: /srv/models\n").unwrap();

        let cli = Cli::parse_from(["iris-server", "--port", "9100"]);
        let config = ServerConfig::load(path.to_str().unwrap(), &cli).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9100);
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["iris-server", "--models-dir", "artifacts"]);
        let config = ServerConfig::load("/nonexistent/iris-server.yaml", &cli).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.models_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
