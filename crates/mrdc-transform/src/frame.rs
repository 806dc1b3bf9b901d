//! DataFrame access helpers shared by the transforms.
//!
//! Transforms read a column into plain values, compute the replacement in
//! full, and only then swap it into the frame.

use mrdc_common::{column_f64_values, column_text_values};
use polars::prelude::*;

use crate::error::{Result, TransformError};

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

pub(crate) fn require_column(df: &DataFrame, name: &str) -> Result<()> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(TransformError::column_not_found(name))
    }
}

/// Reads a column as text, one entry per row.
pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    require_column(df, name)?;
    Ok(column_text_values(df, name)?)
}

pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    require_column(df, name)?;
    Ok(column_f64_values(df, name)?)
}

pub(crate) fn dtype_of(df: &DataFrame, name: &str) -> Result<DataType> {
    require_column(df, name)?;
    Ok(df.column(name)?.dtype().clone())
}

/// Replaces (or appends) a text column.
pub(crate) fn set_text_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

pub(crate) fn set_int_column(df: &mut DataFrame, name: &str, values: Vec<Option<i64>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

pub(crate) fn set_float_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<f64>>,
) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Keeps the rows flagged `true` and returns how many were dropped.
pub(crate) fn retain_rows(df: &mut DataFrame, keep: &[bool]) -> Result<usize> {
    let dropped = keep.iter().filter(|&&k| !k).count();
    if dropped == 0 {
        return Ok(0);
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask)?;
    Ok(dropped)
}

/// Counts positions where the rewritten value differs from the source.
pub(crate) fn count_changed(before: &[Option<String>], after: &[Option<String>]) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| old != new)
        .count()
}

/// Counts rows that had a value before and none after.
pub(crate) fn count_lost<T>(before: &[Option<String>], after: &[Option<T>]) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| old.is_some() && new.is_none())
        .count()
}
