//! Property Features - Command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use pipeline::{init_logging, FeatureEngineer, PipelineConfig, RunOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "property-features")]
#[command(version, about = "Engineer features for property assessment data", long_about = None)]
struct Cli {
    /// Input CSV file with a header row
    input: PathBuf,

    /// Output directory (replaced on every run)
    output: PathBuf,

    /// Optional configuration file (TOML, YAML, or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_logging(&config.log_level)?;

    info!("=== Property Features v{} ===", env!("CARGO_PKG_VERSION"));

    let engineer = FeatureEngineer::new(config)?;
    let outcome = engineer
        .run(&cli.input, &cli.output)
        .with_context(|| format!("Feature engineering failed for {}", cli.input.display()))?;

    match outcome {
        RunOutcome::Written { path, rows, columns } => {
            info!("Done: {} rows x {} columns in {}", rows, columns, path.display());
        }
        RunOutcome::MissingColumns(missing) => {
            warn!("No output written, missing: {}", missing.join(", "));
        }
    }

    Ok(())
}
