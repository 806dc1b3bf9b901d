//! Column type casts.
//!
//! Numeric casts are strict: one value that cannot be represented fails the
//! whole step and the column keeps its old type.

use std::collections::BTreeSet;

use mrdc_common::{any_to_f64, any_to_string_opt, parse_f64, parse_i64};
use mrdc_model::TransformOutcome;
use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::frame::{dtype_of, set_float_column, set_int_column, set_text_column, text_values};

/// Casts a column to `Int64`. Integral floats and numeric text are accepted.
pub fn to_int64(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    if dtype_of(df, column)? == DataType::Int64 {
        return Ok(TransformOutcome::for_column(column));
    }
    let series = df.column(column)?.clone();
    let mut values = Vec::with_capacity(df.height());
    let mut converted = 0;
    for idx in 0..df.height() {
        let value = series.get(idx)?;
        let Some(text) = any_to_string_opt(value.clone()) else {
            values.push(None);
            continue;
        };
        let parsed = mrdc_common::any_to_i64(value).or_else(|| integral_text(&text));
        match parsed {
            Some(v) => {
                converted += 1;
                values.push(Some(v));
            }
            None => {
                return Err(TransformError::Cast {
                    column: column.to_string(),
                    value: text,
                    target: "Int64",
                });
            }
        }
    }
    set_int_column(df, column, values)?;
    Ok(TransformOutcome::for_column(column).with_changed(converted))
}

fn integral_text(text: &str) -> Option<i64> {
    parse_i64(text).or_else(|| {
        let v = parse_f64(text)?;
        (v.is_finite() && v.fract() == 0.0 && v.abs() < 9.2e18).then_some(v as i64)
    })
}

/// Casts a column to `Float64`.
pub fn to_float64(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    if dtype_of(df, column)? == DataType::Float64 {
        return Ok(TransformOutcome::for_column(column));
    }
    let series = df.column(column)?.clone();
    let mut values = Vec::with_capacity(df.height());
    let mut converted = 0;
    for idx in 0..df.height() {
        let value = series.get(idx)?;
        let Some(text) = any_to_string_opt(value.clone()) else {
            values.push(None);
            continue;
        };
        match any_to_f64(value) {
            Some(v) => {
                converted += 1;
                values.push(Some(v));
            }
            None => {
                return Err(TransformError::Cast {
                    column: column.to_string(),
                    value: text,
                    target: "Float64",
                });
            }
        }
    }
    set_float_column(df, column, values)?;
    Ok(TransformOutcome::for_column(column).with_changed(converted))
}

/// Casts a column to text. Nulls stay null.
pub fn to_text(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    if dtype_of(df, column)? == DataType::String {
        return Ok(TransformOutcome::for_column(column));
    }
    let values = text_values(df, column)?;
    let converted = values.iter().flatten().count();
    set_text_column(df, column, values)?;
    Ok(TransformOutcome::for_column(column).with_changed(converted))
}

/// Marks a column as categorical: stored as text, with its distinct levels
/// recorded in the outcome.
pub fn to_category(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    let mut outcome = to_text(df, column)?;
    let levels: BTreeSet<String> = text_values(df, column)?.into_iter().flatten().collect();
    outcome.levels = levels.into_iter().collect();
    Ok(outcome)
}
