//! Required Column Validator

use crate::error::ValidationError;
use tracing::debug;

/// Column name that must appear verbatim in every input header
pub const ASSESSED_VALUE_HEADER: &str = "ASSESSED_VALUE";

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Columns that must be present, compared by exact name
    pub required_columns: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_columns: vec![ASSESSED_VALUE_HEADER.to_string()],
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all required columns are present
    pub valid: bool,
    /// Names of the required columns that were not found
    pub missing: Vec<String>,
    /// Number of required columns checked
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            missing: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result listing the missing columns
    pub fn invalid(missing: Vec<String>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            missing,
            fields_checked,
        }
    }

    /// Convert into a `Result`, failing with the missing column names
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::MissingColumns(self.missing))
        }
    }
}

/// Header validator for property datasets
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check a header against the required columns.
    ///
    /// The comparison is case-sensitive: `assessed_value` does not satisfy
    /// a requirement for `ASSESSED_VALUE`.
    pub fn validate_columns<S: AsRef<str>>(&self, columns: &[S]) -> ValidationResult {
        let missing: Vec<String> = self
            .config
            .required_columns
            .iter()
            .filter(|required| !columns.iter().any(|c| c.as_ref() == required.as_str()))
            .cloned()
            .collect();

        let checked = self.config.required_columns.len();
        debug!("Checked {} required columns, {} missing", checked, missing.len());

        if missing.is_empty() {
            ValidationResult::valid(checked)
        } else {
            ValidationResult::invalid(missing, checked)
        }
    }

    /// Same as [`Validator::validate_columns`], as a `Result`
    pub fn check_required<S: AsRef<str>>(&self, columns: &[S]) -> Result<(), ValidationError> {
        self.validate_columns(columns).into_result()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
