//! CSV Store Implementation

use crate::StorageError;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Data file written inside the output directory
pub const PART_FILE: &str = "part-00000.csv";

/// Empty marker written after the data file is complete
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Delimited file options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field separator
    pub delimiter: u8,
    /// Rows scanned for type inference (`None` scans the whole file)
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_schema_length: None,
        }
    }
}

/// Reads and writes property tables as delimited files with a header row
pub struct CsvStore {
    options: CsvOptions,
}

impl CsvStore {
    /// Create a new store
    pub fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Load a table, inferring column types from content
    pub fn read_table(&self, path: &Path) -> Result<DataFrame, StorageError> {
        if !path.is_file() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }

        // A zero-byte file is a table with no columns, not a parse error
        if fs::metadata(path)?.len() == 0 {
            info!("Input {} is empty", path.display());
            return Ok(DataFrame::empty());
        }

        let delimiter = self.options.delimiter;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.options.infer_schema_length)
            .map_parse_options(|parse| parse.with_separator(delimiter))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }

    /// Write a table into `dir`, replacing any previous contents.
    ///
    /// The directory is removed and recreated, the table is written to
    /// [`PART_FILE`], then [`SUCCESS_MARKER`] is created. Returns the path of
    /// the data file.
    pub fn write_table(&self, df: &mut DataFrame, dir: &Path) -> Result<PathBuf, StorageError> {
        if dir.is_dir() {
            debug!("Clearing existing output in {}", dir.display());
            fs::remove_dir_all(dir)?;
        } else if dir.exists() {
            fs::remove_file(dir)?;
        }
        fs::create_dir_all(dir)?;

        let path = dir.join(PART_FILE);
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(self.options.delimiter)
            .finish(df)?;

        File::create(dir.join(SUCCESS_MARKER))?;

        info!("Wrote {} rows to {}", df.height(), path.display());
        Ok(path)
    }
}

impl Default for CsvStore {
    fn default() -> Self {
        Self::new(CsvOptions::default())
    }
}
