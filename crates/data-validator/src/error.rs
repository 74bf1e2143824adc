//! Validation Error Types

use thiserror::Error;

/// Errors during dataset validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A single column needed by a computation is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// One or more required columns are absent from the header
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
