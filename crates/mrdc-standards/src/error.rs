//! Error types for reference table loading.

use thiserror::Error;

/// Errors that can occur when loading a reference table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to read or parse a CSV table.
    #[error("failed to read {table} table: {source}")]
    CsvRead {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Invalid value in a table field.
    #[error("invalid {field} value '{value}' in {table} table")]
    InvalidValue {
        field: &'static str,
        value: String,
        table: &'static str,
    },
}

/// Result type for reference table operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
