//! Error types for loading.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("warehouse error: {0}")]
    Database(#[from] postgres::Error),

    /// Failed to create or write an output file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the frame.
    #[error("failed to write CSV for table '{table}': {source}")]
    CsvWrite {
        table: String,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
