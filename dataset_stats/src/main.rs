use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::FileFormat;
use dataset_stats::{
    compute_ann_statistics, compute_image_statistics, render, Dataset, ManifestDataset,
    StatsConfig,
};

#[derive(Parser)]
#[command(name = "dataset-stats")]
#[command(version, about = "Image and annotation statistics for datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Statistics config file (YAML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Report format: yaml or json
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml", global = true)]
    format: FileFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Directory for log files
    #[arg(long, value_name = "DIR", default_value = "logs", global = true)]
    log_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-channel image mean and standard deviation
    Images {
        /// Dataset manifest (YAML or JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },
    /// Annotation counts by type and attribute
    Annotations {
        /// Dataset manifest (YAML or JSON)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    common::log_setup::setup_logging("dataset_stats", &cli.log_level, &cli.log_dir)
        .context("Failed to set up logging")?;

    let config = match &cli.config {
        Some(path) => StatsConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => StatsConfig::default(),
    };

    let report = match &cli.command {
        Commands::Images { manifest } => {
            let dataset = load_dataset(manifest)?;
            let stats = compute_image_statistics(&dataset, &config)?;
            render(&stats, cli.format)?
        }
        Commands::Annotations { manifest } => {
            let dataset = load_dataset(manifest)?;
            let stats = compute_ann_statistics(&dataset);
            render(&stats, cli.format)?
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, report)
                .with_context(|| format!("Failed to write report '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => print!("{}", report),
    }

    Ok(())
}

fn load_dataset(path: &Path) -> anyhow::Result<ManifestDataset> {
    let dataset = ManifestDataset::load(path)
        .with_context(|| format!("Failed to load dataset '{}'", path.display()))?;
    tracing::info!(
        manifest = %dataset.path().display(),
        items = dataset.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}
