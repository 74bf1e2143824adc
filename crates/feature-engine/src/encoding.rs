//! Categorical Encoding
//!
//! A column is encoded in two steps: every distinct string value gets a dense
//! index, then each index is expanded into a one-hot vector. Each column is
//! fitted on its own; vocabularies are never shared.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::error::FeatureError;

/// What to do with values the index cannot map (nulls, unseen labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleInvalid {
    /// Fail the encoding
    #[default]
    Error,
    /// Drop the affected rows
    Skip,
    /// Map to an extra index one past the last label
    Keep,
}

/// Encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Policy for values outside the fitted vocabulary
    pub handle_invalid: HandleInvalid,
    /// Omit the last category from the vector (it encodes as all zeros)
    pub drop_last: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            handle_invalid: HandleInvalid::Error,
            drop_last: true,
        }
    }
}

/// Fitted vocabulary of a single categorical column.
///
/// Labels are ordered by descending frequency, ties by ascending label, so
/// the most common value gets index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct StringIndex {
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl StringIndex {
    /// Fit a vocabulary over a column's values; nulls are not labels
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts: HashMap<&'a str, usize> = HashMap::new();
        for value in values.into_iter().flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let labels: Vec<String> = ranked.into_iter().map(|(l, _)| l.to_string()).collect();
        let lookup = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();

        Self { labels, lookup }
    }

    /// Labels in index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels were seen
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of `label`, if it was seen during fitting
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }
}

/// One-hot vector rendered in sparse form: `(size,[index],[1.0])`.
///
/// An index at or past `size` (the dropped last category) renders as the
/// all-zero vector `(size,[],[])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneHotVector {
    pub size: usize,
    pub index: usize,
}

impl OneHotVector {
    /// Create a vector of `size` with position `index` set
    pub fn new(size: usize, index: usize) -> Self {
        Self { size, index }
    }

    /// Whether any position is set
    pub fn is_zero(&self) -> bool {
        self.index >= self.size
    }
}

impl fmt::Display for OneHotVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "({},[],[])", self.size)
        } else {
            write!(f, "({},[{}],[1.0])", self.size, self.index)
        }
    }
}

/// Fits and applies a string index plus one-hot expansion to one column
pub struct CategoryEncoder {
    config: EncoderConfig,
}

impl CategoryEncoder {
    /// Create a new encoder
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Name of the index column produced for `prefix`
    pub fn index_column(prefix: &str) -> String {
        format!("{prefix}_index")
    }

    /// Name of the vector column produced for `prefix`
    pub fn vector_column(prefix: &str) -> String {
        format!("{prefix}_vec")
    }

    /// Fit a vocabulary over `column`; non-string columns are cast to string
    pub fn fit(&self, df: &DataFrame, column: &str) -> Result<StringIndex, FeatureError> {
        let values = df.column(column)?.cast(&DataType::String)?;
        let index = StringIndex::fit(values.str()?);
        debug!("Fitted {} labels for {}", index.len(), column);
        Ok(index)
    }

    /// Length of the one-hot vectors produced for `index`
    pub fn vector_size(&self, index: &StringIndex) -> usize {
        let categories = match self.config.handle_invalid {
            HandleInvalid::Keep => index.len() + 1,
            HandleInvalid::Error | HandleInvalid::Skip => index.len(),
        };
        if self.config.drop_last {
            categories.saturating_sub(1)
        } else {
            categories
        }
    }

    /// Append `<prefix>_index` and `<prefix>_vec` computed from `column`
    pub fn transform(
        &self,
        df: DataFrame,
        column: &str,
        index: &StringIndex,
        prefix: &str,
    ) -> Result<DataFrame, FeatureError> {
        let values = df.column(column)?.cast(&DataType::String)?;
        let values = values.str()?;

        let mut retained = Vec::with_capacity(values.len());
        let mut positions = Vec::with_capacity(values.len());

        for value in values {
            match value.and_then(|v| index.index_of(v)) {
                Some(position) => {
                    retained.push(true);
                    positions.push(position);
                }
                None => match self.config.handle_invalid {
                    HandleInvalid::Error => {
                        return Err(FeatureError::InvalidCategory {
                            column: column.to_string(),
                            value: value.map(str::to_string),
                        })
                    }
                    HandleInvalid::Skip => retained.push(false),
                    HandleInvalid::Keep => {
                        retained.push(true);
                        positions.push(index.len());
                    }
                },
            }
        }

        let mut df = if retained.iter().all(|r| *r) {
            df
        } else {
            let mask = BooleanChunked::from_slice("retained".into(), &retained);
            let filtered = df.filter(&mask)?;
            debug!(
                "Skipped {} rows with invalid {}",
                retained.len() - filtered.height(),
                column
            );
            filtered
        };

        let size = self.vector_size(index);
        let indices: Vec<f64> = positions.iter().map(|&p| p as f64).collect();
        let vectors: Vec<String> = positions
            .iter()
            .map(|&p| OneHotVector::new(size, p).to_string())
            .collect();

        df.with_column(Series::new(Self::index_column(prefix).into(), indices))?;
        df.with_column(Series::new(Self::vector_column(prefix).into(), vectors))?;

        Ok(df)
    }

    /// Fit on `column` and transform in one pass
    pub fn encode(
        &self,
        df: DataFrame,
        column: &str,
        prefix: &str,
    ) -> Result<DataFrame, FeatureError> {
        let index = self.fit(&df, column)?;
        self.transform(df, column, &index, prefix)
    }
}

impl Default for CategoryEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}
