//! Row-wise Derived Features

use data_validator::ColumnResolver;
use polars::prelude::*;
use tracing::debug;

use crate::error::FeatureError;

/// Logical input column names
pub const ASSESSED_VALUE: &str = "assessed_value";
pub const LAND_SIZE_SF: &str = "land_size_sf";
pub const YEAR_OF_CONSTRUCTION: &str = "year_of_construction";
pub const COMM_NAME: &str = "comm_name";
pub const PROPERTY_TYPE: &str = "property_type";

/// Derived output column names
pub const PRICE_PER_SQFT: &str = "price_per_sqft";
pub const PROPERTY_AGE: &str = "property_age";
pub const AVG_COMM_VALUE: &str = "avg_comm_value";

/// Constants used by the row-wise formulas
#[derive(Debug, Clone)]
pub struct DerivedFeatureConfig {
    /// Year that construction years are subtracted from
    pub reference_year: i32,
    /// Added to the land size before dividing
    pub land_size_offset: f64,
}

impl Default for DerivedFeatureConfig {
    fn default() -> Self {
        Self {
            reference_year: 2024,
            land_size_offset: 1.0,
        }
    }
}

/// Appends `price_per_sqft` and `property_age` to a property table
pub struct FeatureExtractor {
    config: DerivedFeatureConfig,
}

impl FeatureExtractor {
    /// Create a new extractor
    pub fn new(config: DerivedFeatureConfig) -> Self {
        Self { config }
    }

    /// `assessed_value / (land_size_sf + offset)`, null where the
    /// denominator is still zero
    pub fn price_per_sqft(&self, assessed_value: &str, land_size_sf: &str) -> Expr {
        let denominator =
            col(land_size_sf).strict_cast(DataType::Float64) + lit(self.config.land_size_offset);

        when(denominator.clone().eq(lit(0.0)))
            .then(lit(NULL).cast(DataType::Float64))
            .otherwise(col(assessed_value).strict_cast(DataType::Float64) / denominator)
            .alias(PRICE_PER_SQFT)
    }

    /// `reference_year - year_of_construction`
    pub fn property_age(&self, year_of_construction: &str) -> Expr {
        (lit(self.config.reference_year as i64)
            - col(year_of_construction).strict_cast(DataType::Int64))
        .alias(PROPERTY_AGE)
    }

    /// Append both derived columns, resolving inputs through `columns`
    pub fn extract(
        &self,
        df: DataFrame,
        columns: &ColumnResolver,
    ) -> Result<DataFrame, FeatureError> {
        let assessed_value = columns.require(ASSESSED_VALUE)?;
        let land_size_sf = columns.require(LAND_SIZE_SF)?;
        let year_of_construction = columns.require(YEAR_OF_CONSTRUCTION)?;

        debug!(
            "Deriving features from {}, {}, {} over {} rows",
            assessed_value,
            land_size_sf,
            year_of_construction,
            df.height()
        );

        let df = df
            .lazy()
            .with_columns([
                self.price_per_sqft(assessed_value, land_size_sf),
                self.property_age(year_of_construction),
            ])
            .collect()?;

        Ok(df)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(DerivedFeatureConfig::default())
    }
}
