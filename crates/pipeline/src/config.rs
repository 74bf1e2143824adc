//! Pipeline configuration

use config::ConfigError;
use data_validator::{ValidationConfig, ASSESSED_VALUE_HEADER};
use feature_engine::{DerivedFeatureConfig, EncoderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use storage::CsvOptions;

/// Prefix for environment overrides, e.g. `PROPERTY_FEATURES__REFERENCE_YEAR`
pub const ENV_PREFIX: &str = "PROPERTY_FEATURES";

/// Feature pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Year that construction years are subtracted from
    pub reference_year: i32,

    /// Added to the land size before dividing
    pub land_size_offset: f64,

    /// Header entries that must be present verbatim
    pub required_columns: Vec<String>,

    /// Resolve feature inputs by exact name instead of ignoring case
    pub case_sensitive_columns: bool,

    /// Rows scanned for type inference; all rows when unset
    pub infer_schema_length: Option<usize>,

    /// Single-byte field separator for input and output
    pub delimiter: String,

    /// Encoder for `property_type`
    pub property_type_encoding: EncoderConfig,

    /// Encoder for `comm_name`
    pub comm_name_encoding: EncoderConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_year: 2024,
            land_size_offset: 1.0,
            required_columns: vec![ASSESSED_VALUE_HEADER.to_string()],
            case_sensitive_columns: false,
            infer_schema_length: None,
            delimiter: ",".to_string(),
            property_type_encoding: EncoderConfig::default(),
            comm_name_encoding: EncoderConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from an optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Same as [`PipelineConfig::load`], reading overrides from variables
    /// named `<prefix>__<KEY>`
    pub fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Settings for the required-column check
    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig {
            required_columns: self.required_columns.clone(),
        }
    }

    /// Settings for the row-wise formulas
    pub fn derived_features(&self) -> DerivedFeatureConfig {
        DerivedFeatureConfig {
            reference_year: self.reference_year,
            land_size_offset: self.land_size_offset,
        }
    }

    /// Settings for reading and writing delimited files
    pub fn csv_options(&self) -> Result<CsvOptions, ConfigError> {
        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(ConfigError::Message(format!(
                    "delimiter must be a single byte, got {:?}",
                    self.delimiter
                )))
            }
        };

        Ok(CsvOptions {
            delimiter,
            infer_schema_length: self.infer_schema_length,
        })
    }
}
