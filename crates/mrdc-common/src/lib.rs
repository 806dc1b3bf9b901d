//! Shared utilities for the retail data centre crates.
//!
//! This crate provides the polars helpers every stage of the pipeline leans on
//! (value extraction, column profiling) and the switch that controls whether
//! row-level values may appear in logs.

pub mod polars;
pub mod profile;
pub mod redact;
pub mod sql;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_opt, column_f64_values,
    column_text_values, format_numeric, parse_f64, parse_i64,
};
pub use profile::{longest_value_len, null_percentages};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use sql::quote_identifier;
