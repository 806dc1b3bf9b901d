//! Column removal.

use mrdc_model::TransformOutcome;
use polars::prelude::DataFrame;

use crate::error::{Result, TransformError};
use crate::frame::has_column;

/// Drops the named columns. Any missing column fails the step and nothing
/// is dropped.
pub fn drop_columns(df: &mut DataFrame, columns: &[&str]) -> Result<TransformOutcome> {
    if let Some(missing) = columns.iter().find(|name| !has_column(df, name)) {
        return Err(TransformError::column_not_found(missing));
    }
    for name in columns {
        df.drop_in_place(name)?;
    }
    Ok(TransformOutcome::default())
}
