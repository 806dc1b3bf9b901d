//! Column profiling used for warehouse sizing and null reporting.

use polars::prelude::DataFrame;

use crate::polars::any_to_string;

/// Length in characters of the longest rendered value in a column.
///
/// Used to size `VARCHAR` columns in the warehouse. Returns `None` when the
/// column does not exist; nulls count as empty.
pub fn longest_value_len(df: &DataFrame, column: &str) -> Option<usize> {
    let series = df.column(column).ok()?;
    let mut longest = 0usize;
    for idx in 0..df.height() {
        let value = series.get(idx).ok()?;
        longest = longest.max(any_to_string(value).chars().count());
    }
    Some(longest)
}

/// Percentage of null cells per column, for columns that contain any nulls.
///
/// Percentages are rounded to two decimals. An empty frame reports nothing.
pub fn null_percentages(df: &DataFrame) -> Vec<(String, f64)> {
    let height = df.height();
    if height == 0 {
        return Vec::new();
    }
    df.get_columns()
        .iter()
        .filter_map(|column| {
            let nulls = column.null_count();
            if nulls == 0 {
                return None;
            }
            let percent = (nulls as f64 / height as f64) * 100.0;
            Some((
                column.name().to_string(),
                (percent * 100.0).round() / 100.0,
            ))
        })
        .collect()
}
