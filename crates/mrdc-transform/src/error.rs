//! Error types for field transforms.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that fail a transform step. The frame is left unchanged.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Column not found in DataFrame.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A strict cast met a value it cannot represent.
    #[error("cannot convert '{value}' in column '{column}' to {target}")]
    Cast {
        column: String,
        value: String,
        target: &'static str,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

impl TransformError {
    pub fn column_not_found(column: &str) -> Self {
        TransformError::ColumnNotFound {
            column: column.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
