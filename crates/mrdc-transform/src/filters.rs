//! Row filters.
//!
//! Filters decide which rows stay. Null cells never equal a listed value, so
//! exclusion filters keep them and inclusion filters drop them.

use mrdc_model::TransformOutcome;
use mrdc_standards::{CardCheck, check_card};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{retain_rows, text_values};

/// Drops rows whose value in `column` equals `value`.
pub fn drop_rows_with_value(
    df: &mut DataFrame,
    column: &str,
    value: &str,
) -> Result<TransformOutcome> {
    drop_rows_in(df, column, &[value])
}

/// Keeps only rows whose value in `column` is one of `allowed`.
pub fn keep_rows_in(df: &mut DataFrame, column: &str, allowed: &[&str]) -> Result<TransformOutcome> {
    let values = text_values(df, column)?;
    let keep: Vec<bool> = values
        .iter()
        .map(|v| v.as_deref().is_some_and(|v| allowed.contains(&v)))
        .collect();
    let dropped = retain_rows(df, &keep)?;
    Ok(TransformOutcome::for_column(column).with_dropped(dropped))
}

/// Drops rows whose value in `column` is one of `excluded`.
pub fn drop_rows_in(df: &mut DataFrame, column: &str, excluded: &[&str]) -> Result<TransformOutcome> {
    let values = text_values(df, column)?;
    let keep: Vec<bool> = values
        .iter()
        .map(|v| !v.as_deref().is_some_and(|v| excluded.contains(&v)))
        .collect();
    let dropped = retain_rows(df, &keep)?;
    Ok(TransformOutcome::for_column(column).with_dropped(dropped))
}

/// Drops rows with a null in `column`.
pub fn drop_null_rows(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    crate::frame::require_column(df, column)?;
    let keep: Vec<bool> = df
        .column(column)?
        .is_not_null()
        .into_iter()
        .map(|v| v.unwrap_or(false))
        .collect();
    let dropped = retain_rows(df, &keep)?;
    Ok(TransformOutcome::for_column(column).with_dropped(dropped))
}

/// Drops rows with a null in any column.
pub fn drop_rows_with_any_null(df: &mut DataFrame) -> Result<TransformOutcome> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        if column.null_count() == 0 {
            continue;
        }
        for (idx, not_null) in column.is_not_null().into_iter().enumerate() {
            if !not_null.unwrap_or(false) {
                keep[idx] = false;
            }
        }
    }
    let dropped = retain_rows(df, &keep)?;
    Ok(TransformOutcome::rows_dropped(dropped))
}

/// Drops rows whose card number does not match their provider's format.
///
/// Rows with an unknown provider or no number are dropped as well.
pub fn validate_card_numbers(
    df: &mut DataFrame,
    number_column: &str,
    provider_column: &str,
) -> Result<TransformOutcome> {
    let numbers = text_values(df, number_column)?;
    let providers = text_values(df, provider_column)?;

    let (mut mismatched, mut unknown, mut missing) = (0usize, 0usize, 0usize);
    let keep: Vec<bool> = numbers
        .iter()
        .zip(&providers)
        .map(|(number, provider)| {
            match check_card(number.as_deref(), provider.as_deref()) {
                CardCheck::Accepted(_) => return true,
                CardCheck::Mismatch(_) => mismatched += 1,
                CardCheck::UnknownProvider => unknown += 1,
                CardCheck::MissingNumber => missing += 1,
            }
            false
        })
        .collect();

    let dropped = retain_rows(df, &keep)?;
    tracing::debug!(
        column = number_column,
        mismatched,
        unknown_provider = unknown,
        missing_number = missing,
        "card numbers rejected"
    );
    Ok(TransformOutcome::for_column(number_column).with_dropped(dropped))
}
