//! Neighborhood Aggregates

use data_validator::ColumnResolver;
use polars::prelude::*;
use tracing::debug;

use crate::error::FeatureError;
use crate::features::{ASSESSED_VALUE, AVG_COMM_VALUE, COMM_NAME};

/// Attach the mean assessed value of each community to every row in it.
///
/// Rows with a null community name form their own group. The row count and
/// row order are unchanged.
pub fn add_neighborhood_average(
    df: DataFrame,
    columns: &ColumnResolver,
) -> Result<DataFrame, FeatureError> {
    let assessed_value = columns.require(ASSESSED_VALUE)?;
    let comm_name = columns.require(COMM_NAME)?;

    debug!("Averaging {} over {} partitions", assessed_value, comm_name);

    let df = df
        .lazy()
        .with_column(
            col(assessed_value)
                .strict_cast(DataType::Float64)
                .mean()
                .over([col(comm_name)])
                .alias(AVG_COMM_VALUE),
        )
        .collect()?;

    Ok(df)
}
