//! Header Resolution
//!
//! Maps the lower-case logical names used by the feature computations onto
//! the physical header of a dataset.

use crate::error::ValidationError;

/// Resolves logical column names against a dataset header
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    columns: Vec<String>,
    case_sensitive: bool,
}

impl ColumnResolver {
    /// Create a resolver over the given header
    pub fn new<S: AsRef<str>>(columns: &[S], case_sensitive: bool) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            case_sensitive,
        }
    }

    /// Physical name for `logical`, if any.
    ///
    /// An exact match always wins. In case-insensitive mode the first header
    /// entry equal ignoring ASCII case is used otherwise.
    pub fn resolve(&self, logical: &str) -> Option<&str> {
        if let Some(exact) = self.columns.iter().find(|c| c.as_str() == logical) {
            return Some(exact);
        }
        if self.case_sensitive {
            return None;
        }
        self.columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(logical))
            .map(String::as_str)
    }

    /// Physical name for `logical`, failing if it is absent
    pub fn require(&self, logical: &str) -> Result<&str, ValidationError> {
        self.resolve(logical)
            .ok_or_else(|| ValidationError::MissingColumn(logical.to_string()))
    }
}
