//! Feature Engineering Engine
//!
//! Adds engineered columns to property tables: row-wise derived values, a
//! per-neighborhood assessed value mean, and one-hot encodings of
//! categorical columns.

mod encoding;
mod error;
mod features;
mod statistics;

pub use encoding::{CategoryEncoder, EncoderConfig, HandleInvalid, OneHotVector, StringIndex};
pub use error::FeatureError;
pub use features::{
    DerivedFeatureConfig, FeatureExtractor, ASSESSED_VALUE, AVG_COMM_VALUE, COMM_NAME,
    LAND_SIZE_SF, PRICE_PER_SQFT, PROPERTY_AGE, PROPERTY_TYPE, YEAR_OF_CONSTRUCTION,
};
pub use statistics::add_neighborhood_average;
