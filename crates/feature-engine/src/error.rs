//! Feature Engine Error Types

use data_validator::ValidationError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while computing features
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Dataframe engine failure (bad casts, arithmetic on strings, ...)
    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),

    /// A column needed by a computation could not be resolved
    #[error(transparent)]
    Column(#[from] ValidationError),

    /// A categorical value that the encoder cannot index
    #[error("Invalid value in categorical column {column}: {}", .value.as_deref().unwrap_or("null"))]
    InvalidCategory {
        column: String,
        value: Option<String>,
    },
}
