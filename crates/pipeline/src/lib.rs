//! Property Feature Pipeline
//!
//! Loads a property assessment table, appends engineered columns, and
//! writes the result to an output directory.

use data_validator::{ColumnResolver, ValidationError, Validator};
use feature_engine::{
    add_neighborhood_average, CategoryEncoder, FeatureError, FeatureExtractor, COMM_NAME,
    PROPERTY_TYPE,
};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use storage::{CsvStore, StorageError};
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;

pub use crate::config::PipelineConfig;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Features were written to `path`
    Written {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },
    /// Required columns were absent; nothing was written
    MissingColumns(Vec<String>),
}

/// Runs the load, validate, derive, aggregate, encode, save sequence
pub struct FeatureEngineer {
    config: PipelineConfig,
    store: CsvStore,
    validator: Validator,
    extractor: FeatureExtractor,
}

impl FeatureEngineer {
    /// Create a pipeline from configuration
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            store: CsvStore::new(config.csv_options()?),
            validator: Validator::new(config.validation()),
            extractor: FeatureExtractor::new(config.derived_features()),
            config,
        })
    }

    /// Engineer features for `input` and write them into `output`.
    ///
    /// A missing required column is not an error: it is logged and the run
    /// returns [`RunOutcome::MissingColumns`] without touching `output`.
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunOutcome, PipelineError> {
        info!("Loading data for feature engineering...");
        let df = self.store.read_table(input)?;

        let header: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();

        if let Err(err) = self.validator.check_required(&header) {
            warn!("{}, skipping feature engineering", err);
            let missing = match err {
                ValidationError::MissingColumns(missing) => missing,
                ValidationError::MissingColumn(column) => vec![column],
            };
            return Ok(RunOutcome::MissingColumns(missing));
        }

        let columns = ColumnResolver::new(&header, self.config.case_sensitive_columns);

        info!("Creating new features...");
        let df = self.extractor.extract(df, &columns)?;

        info!("Calculating neighborhood trends...");
        let df = add_neighborhood_average(df, &columns)?;

        info!("Encoding categorical features...");
        let mut df = self.encode_categorical(df, &columns)?;

        info!("Saving feature-engineered data...");
        let path = self.store.write_table(&mut df, output)?;
        info!("Feature-engineered data saved to {}", output.display());

        Ok(RunOutcome::Written {
            path,
            rows: df.height(),
            columns: df.width(),
        })
    }

    /// Encode `property_type` then `comm_name`, each with its own encoder,
    /// skipping a column that is not in the header
    fn encode_categorical(
        &self,
        mut df: DataFrame,
        columns: &ColumnResolver,
    ) -> Result<DataFrame, PipelineError> {
        if let Some(source) = columns.resolve(PROPERTY_TYPE) {
            let encoder = CategoryEncoder::new(self.config.property_type_encoding.clone());
            df = encoder.encode(df, source, PROPERTY_TYPE)?;
        }

        if let Some(source) = columns.resolve(COMM_NAME) {
            let encoder = CategoryEncoder::new(self.config.comm_name_encoding.clone());
            df = encoder.encode(df, source, COMM_NAME)?;
        }

        Ok(df)
    }
}

/// Initialize logging at the given level
pub fn init_logging(level: &str) -> Result<(), PipelineError> {
    let level = Level::from_str(level).map_err(|e| PipelineError::Logging(e.to_string()))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PipelineError::Logging(e.to_string()))
}
