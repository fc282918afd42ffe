//! Iris Train
//!
//! One-shot job: fits the scaler and both classifiers on the embedded iris
//! dataset and exports them for the inference service. Any failure aborts
//! the job with a non-zero exit code.

use anyhow::{Context, Result};
use clap::Parser;
use iris_classifiers::artifacts::DEFAULT_MODELS_DIR;
use iris_classifiers::training;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "iris-train")]
#[command(author, version, about = "Train and export the iris classifiers", long_about = None)]
struct Cli {
    /// Directory the artifacts are written to
    #[arg(short, long, env = "IRIS_MODELS_DIR", default_value = DEFAULT_MODELS_DIR)]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(
        seed = training::SEED,
        train_ratio = training::TRAIN_RATIO,
        "Starting training job"
    );

    let report = training::run(&cli.output_dir)
        .with_context(|| format!("Training failed for {}", cli.output_dir.display()))?;

    info!(
        train_samples = report.train_samples,
        test_samples = report.test_samples,
        logistic_accuracy = report.logistic_accuracy,
        decision_tree_accuracy = report.decision_tree_accuracy,
        "Training complete"
    );
    for path in &report.written {
        info!("  {}", path.display());
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("iris=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iris=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
