//! Storage Layer
//!
//! Reads property tables from delimited files and writes results into an
//! output directory, replacing whatever was there.

mod repository;

pub use repository::{CsvOptions, CsvStore, PART_FILE, SUCCESS_MARKER};

use polars::prelude::PolarsError;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Input file not found: {0}")]
    NotFound(String),
}
