//! Column rewrites.
//!
//! Each function rewrites one column of the frame and reports what changed.
//! The replacement column is computed in full before it is swapped in, so an
//! error leaves the frame as it was.

use mrdc_common::redact_value;
use mrdc_model::TransformOutcome;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{
    count_changed, count_lost, require_column, set_int_column, set_text_column, text_values,
};
use crate::normalization::{
    continent_for_code, country_code_for_name, digits_only, first_integer, format_e164,
    month_year_to_year_month, normalize_date, normalize_time, reformat_address as join_lines,
    resolve_country_name, revalidate_country_code, strip_substring, title_case as to_title,
};

/// Rewrites every non-null value; values `parse` rejects become null.
fn rewrite_parsed(
    df: &mut DataFrame,
    column: &str,
    parse: impl Fn(&str) -> Option<String>,
) -> Result<TransformOutcome> {
    let before = text_values(df, column)?;
    let after: Vec<Option<String>> = before
        .iter()
        .map(|value| value.as_deref().and_then(&parse))
        .collect();
    let failed = count_lost(&before, &after);
    let outcome = TransformOutcome::for_column(column)
        .with_changed(count_changed(&before, &after) - failed)
        .with_failed(failed);
    set_text_column(df, column, after)?;
    Ok(outcome)
}

/// Rewrites every non-null value with an infallible mapping.
fn rewrite_text(
    df: &mut DataFrame,
    column: &str,
    map: impl Fn(&str) -> String,
) -> Result<TransformOutcome> {
    let before = text_values(df, column)?;
    let after: Vec<Option<String>> = before
        .iter()
        .map(|value| value.as_deref().map(&map))
        .collect();
    let outcome = TransformOutcome::for_column(column).with_changed(count_changed(&before, &after));
    set_text_column(df, column, after)?;
    Ok(outcome)
}

/// Normalizes free-form dates to `YYYY-MM-DD`. Unparsable values become null.
pub fn normalize_dates(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_parsed(df, column, normalize_date)
}

/// Rewrites `MM/YY` values as `YYYY-MM`. Anything else becomes null.
pub fn reformat_month_year(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_parsed(df, column, month_year_to_year_month)
}

/// Rewrites times and datetimes as `HH:MM:SS`. Unparsable values become null.
pub fn reformat_time(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_parsed(df, column, normalize_time)
}

pub fn title_case(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_text(df, column, to_title)
}

pub fn upper_case(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_text(df, column, str::to_uppercase)
}

/// Replaces line breaks inside addresses with `", "`.
pub fn reformat_address(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_text(df, column, join_lines)
}

/// Removes a currency symbol (or any fixed substring) from every value.
pub fn strip_currency(df: &mut DataFrame, column: &str, symbol: &str) -> Result<TransformOutcome> {
    rewrite_text(df, column, |value| strip_substring(value, symbol))
}

/// Replaces free-form country names with their ISO name, or `"N/A"`.
pub fn resolve_country_names(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    let before = text_values(df, column)?;
    let after: Vec<Option<String>> = before
        .iter()
        .map(|value| Some(resolve_country_name(value.as_deref())))
        .collect();
    let failed = count_sentinels(&after, mrdc_standards::UNRESOLVED_COUNTRY);
    let outcome = TransformOutcome::for_column(column)
        .with_changed(count_changed(&before, &after))
        .with_failed(failed);
    set_text_column(df, column, after)?;
    Ok(outcome)
}

/// Fills `code_column` with the alpha-2 code of the country in `name_column`.
///
/// The code column is created when missing.
pub fn fill_country_codes(
    df: &mut DataFrame,
    name_column: &str,
    code_column: &str,
) -> Result<TransformOutcome> {
    let names = text_values(df, name_column)?;
    let before = existing_or_nulls(df, code_column)?;
    let after: Vec<Option<String>> = names
        .iter()
        .map(|name| Some(country_code_for_name(name.as_deref())))
        .collect();
    let failed = count_sentinels(&after, mrdc_standards::UNRESOLVED_COUNTRY);
    let outcome = TransformOutcome::for_column(code_column)
        .with_changed(count_changed(&before, &after))
        .with_failed(failed);
    set_text_column(df, code_column, after)?;
    Ok(outcome)
}

/// Keeps valid alpha-2 codes (upper-cased) and replaces the rest with `"N/A"`.
pub fn revalidate_country_codes(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    let before = text_values(df, column)?;
    let after: Vec<Option<String>> = before
        .iter()
        .map(|code| Some(revalidate_country_code(code.as_deref())))
        .collect();
    let failed = count_sentinels(&after, mrdc_standards::UNRESOLVED_COUNTRY);
    let outcome = TransformOutcome::for_column(column)
        .with_changed(count_changed(&before, &after))
        .with_failed(failed);
    set_text_column(df, column, after)?;
    Ok(outcome)
}

/// Fills `continent_column` with the continent of the code in `code_column`.
pub fn fill_continents(
    df: &mut DataFrame,
    code_column: &str,
    continent_column: &str,
) -> Result<TransformOutcome> {
    let codes = text_values(df, code_column)?;
    let before = existing_or_nulls(df, continent_column)?;
    let after: Vec<Option<String>> = codes
        .iter()
        .map(|code| Some(continent_for_code(code.as_deref()).to_string()))
        .collect();
    let failed = count_sentinels(&after, mrdc_standards::UNKNOWN_CONTINENT);
    let outcome = TransformOutcome::for_column(continent_column)
        .with_changed(count_changed(&before, &after))
        .with_failed(failed);
    set_text_column(df, continent_column, after)?;
    Ok(outcome)
}

/// Formats phone numbers as E.164 using each row's country code as region.
///
/// Numbers that fail to parse keep their raw value and count as failures.
pub fn format_phone_numbers(
    df: &mut DataFrame,
    phone_column: &str,
    region_column: &str,
) -> Result<TransformOutcome> {
    let before = text_values(df, phone_column)?;
    let regions = text_values(df, region_column)?;
    let mut failed = 0;
    let after: Vec<Option<String>> = before
        .iter()
        .zip(&regions)
        .map(|(raw, region)| {
            let raw = raw.as_deref()?;
            match format_e164(raw, region.as_deref()) {
                Some(formatted) => Some(formatted),
                None => {
                    failed += 1;
                    tracing::debug!(
                        column = phone_column,
                        value = redact_value(raw),
                        region = region.as_deref().unwrap_or_default(),
                        "phone number kept unformatted"
                    );
                    Some(raw.to_string())
                }
            }
        })
        .collect();
    let outcome = TransformOutcome::for_column(phone_column)
        .with_changed(count_changed(&before, &after))
        .with_failed(failed);
    set_text_column(df, phone_column, after)?;
    Ok(outcome)
}

/// Removes every non-digit character and stores the result as `Int64`.
///
/// Values with no digits, or too many to fit, become null.
pub fn strip_non_digits(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_int(df, column, digits_only)
}

/// Keeps the first run of digits as `Int64`; values without one become null.
pub fn extract_first_integer(df: &mut DataFrame, column: &str) -> Result<TransformOutcome> {
    rewrite_int(df, column, first_integer)
}

fn rewrite_int(
    df: &mut DataFrame,
    column: &str,
    parse: impl Fn(&str) -> Option<i64>,
) -> Result<TransformOutcome> {
    let before = text_values(df, column)?;
    let after: Vec<Option<i64>> = before
        .iter()
        .map(|value| value.as_deref().and_then(&parse))
        .collect();
    let changed = before
        .iter()
        .zip(&after)
        .filter(|(old, new)| old.as_deref() != new.map(|n| n.to_string()).as_deref())
        .count();
    let outcome = TransformOutcome::for_column(column)
        .with_changed(changed)
        .with_failed(count_lost(&before, &after));
    set_int_column(df, column, after)?;
    Ok(outcome)
}

/// Joins date part columns with `-` into `target` (`year-month-day`).
///
/// A row with any null part gets a null date.
pub fn combine_date_parts(
    df: &mut DataFrame,
    parts: &[&str],
    target: &str,
) -> Result<TransformOutcome> {
    let columns = parts
        .iter()
        .map(|part| text_values(df, part))
        .collect::<Result<Vec<_>>>()?;
    let combined: Vec<Option<String>> = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|values| values[row].as_deref())
                .collect::<Option<Vec<_>>>()
                .map(|pieces| pieces.join("-"))
        })
        .collect();
    let missing = combined.iter().filter(|v| v.is_none()).count();
    let outcome = TransformOutcome::for_column(target)
        .with_changed(combined.len() - missing)
        .with_failed(missing);
    set_text_column(df, target, combined)?;
    Ok(outcome)
}

/// Sets `target` to null on rows where `condition_column` equals `value`.
///
/// Numeric and boolean columns keep their type; anything else becomes text.
pub fn null_where_equals(
    df: &mut DataFrame,
    target: &str,
    condition_column: &str,
    value: &str,
) -> Result<TransformOutcome> {
    require_column(df, target)?;
    let condition = text_values(df, condition_column)?;
    let hit: Vec<bool> = condition
        .iter()
        .map(|v| v.as_deref() == Some(value))
        .collect();

    let source = df.column(target)?.clone();
    let mut changed = 0;
    let replacement = match source.dtype() {
        DataType::Float64 | DataType::Float32 => {
            let values = crate::frame::float_values(df, target)?;
            let out: Vec<Option<f64>> = values
                .into_iter()
                .zip(&hit)
                .map(|(v, &h)| {
                    if h && v.is_some() {
                        changed += 1;
                    }
                    if h { None } else { v }
                })
                .collect();
            Column::new(target.into(), out)
        }
        dtype if dtype.is_integer() => {
            let mut out = Vec::with_capacity(hit.len());
            for (idx, &h) in hit.iter().enumerate() {
                let v = mrdc_common::any_to_i64(source.get(idx)?);
                if h && v.is_some() {
                    changed += 1;
                }
                out.push(if h { None } else { v });
            }
            Column::new(target.into(), out)
        }
        DataType::Boolean => {
            let ca = source.bool()?;
            let out: Vec<Option<bool>> = ca
                .into_iter()
                .zip(&hit)
                .map(|(v, &h)| {
                    if h && v.is_some() {
                        changed += 1;
                    }
                    if h { None } else { v }
                })
                .collect();
            Column::new(target.into(), out)
        }
        _ => {
            let values = text_values(df, target)?;
            let out: Vec<Option<String>> = values
                .into_iter()
                .zip(&hit)
                .map(|(v, &h)| {
                    if h && v.is_some() {
                        changed += 1;
                    }
                    if h { None } else { v }
                })
                .collect();
            Column::new(target.into(), out)
        }
    };
    df.with_column(replacement)?;
    Ok(TransformOutcome::for_column(target).with_changed(changed))
}

fn existing_or_nulls(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    if crate::frame::has_column(df, column) {
        text_values(df, column)
    } else {
        Ok(vec![None; df.height()])
    }
}

fn count_sentinels(values: &[Option<String>], sentinel: &str) -> usize {
    values
        .iter()
        .filter(|v| v.as_deref() == Some(sentinel))
        .count()
}
