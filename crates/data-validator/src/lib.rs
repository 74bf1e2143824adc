//! Data Validation
//!
//! Provides the required-column check and logical-to-physical column
//! resolution for property datasets.

mod error;
mod resolver;
mod validator;

pub use error::ValidationError;
pub use resolver::ColumnResolver;
pub use validator::{Validator, ValidationConfig, ValidationResult, ASSESSED_VALUE_HEADER};
