//! Product weight columns.

use mrdc_model::TransformOutcome;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{float_values, retain_rows, set_float_column, set_text_column, text_values};
use crate::normalization::weight::{WeightUnit, normalize_weight, unit_token};

/// Writes the first alphabetic run of each weight into `unit_column`.
pub fn extract_weight_units(
    df: &mut DataFrame,
    weight_column: &str,
    unit_column: &str,
) -> Result<TransformOutcome> {
    let weights = text_values(df, weight_column)?;
    let units: Vec<Option<String>> = weights
        .iter()
        .map(|w| w.as_deref().and_then(unit_token))
        .collect();
    let found = units.iter().flatten().count();
    let outcome = TransformOutcome::for_column(unit_column)
        .with_changed(found)
        .with_failed(weights.iter().flatten().count() - found);
    set_text_column(df, unit_column, units)?;
    Ok(outcome)
}

/// Converts weights to kilograms (`Float64`) using the extracted units.
///
/// Rows whose unit is not `kg`, `g`, `ml`, `oz` or `x` are dropped. Weights
/// that still cannot be converted become null.
pub fn normalize_weights(
    df: &mut DataFrame,
    weight_column: &str,
    unit_column: &str,
) -> Result<TransformOutcome> {
    let units = text_values(df, unit_column)?;
    let already_numeric = matches!(df.column(weight_column)?.dtype(), DataType::Float64);
    let (weights, numeric) = if already_numeric {
        (Vec::new(), float_values(df, weight_column)?)
    } else {
        (text_values(df, weight_column)?, Vec::new())
    };

    let mut keep = Vec::with_capacity(units.len());
    let mut kilograms = Vec::with_capacity(units.len());
    let mut failed = 0;
    for (idx, unit) in units.iter().enumerate() {
        let Some(unit) = unit.as_deref().and_then(WeightUnit::from_token) else {
            keep.push(false);
            kilograms.push(None);
            continue;
        };
        keep.push(true);
        let value = if already_numeric {
            numeric[idx]
        } else {
            weights[idx].as_deref().and_then(|w| normalize_weight(w, unit))
        };
        if value.is_none() {
            failed += 1;
        }
        kilograms.push(value);
    }

    let mut next = df.clone();
    set_float_column(&mut next, weight_column, kilograms)?;
    let dropped = retain_rows(&mut next, &keep)?;
    *df = next;
    Ok(TransformOutcome::for_column(weight_column)
        .with_changed(keep.len() - dropped - failed)
        .with_failed(failed)
        .with_dropped(dropped))
}
