//! Field transforms for retail data centre tables.
//!
//! - **normalization**: value-level parsers and formatters (dates, phones,
//!   countries, weights, numbers, text)
//! - **transforms**: column rewrites built on the normalizers
//! - **filters**: row filters, including card number validation
//! - **casts**: strict numeric casts, text and categorical columns
//! - **columns**: column removal
//! - **weights**: product weight units and kilogram conversion
//!
//! Every frame-level function takes `&mut DataFrame`, returns a
//! [`TransformOutcome`](mrdc_model::TransformOutcome) and leaves the frame
//! untouched when it fails.

pub mod casts;
pub mod columns;
pub mod error;
pub mod filters;
pub mod frame;
pub mod normalization;
pub mod transforms;
pub mod weights;

pub use casts::{to_category, to_float64, to_int64, to_text};
pub use columns::drop_columns;
pub use error::{Result, TransformError};
pub use filters::{
    drop_null_rows, drop_rows_in, drop_rows_with_any_null, drop_rows_with_value, keep_rows_in,
    validate_card_numbers,
};
pub use frame::has_column;
pub use transforms::{
    combine_date_parts, extract_first_integer, fill_continents, fill_country_codes,
    format_phone_numbers, normalize_dates, null_where_equals, reformat_address,
    reformat_month_year, reformat_time, resolve_country_names, revalidate_country_codes,
    strip_currency, strip_non_digits, title_case, upper_case,
};
pub use weights::{extract_weight_units, normalize_weights};
