//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "iris-server")]
#[command(author, version, about = "Iris species classification service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "IRIS_CONFIG", default_value = "iris-server.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "IRIS_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "IRIS_PORT")]
    pub port: Option<u16>,

    /// Directory holding the trained model artifacts
    #[arg(short, long, env = "IRIS_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
