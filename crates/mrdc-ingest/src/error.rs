//! Error types for extraction.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while extracting a source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Failed to parse CSV content.
    #[error("failed to parse CSV from {location}: {source}")]
    CsvParse {
        location: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse JSON from {location}: {source}")]
    JsonParse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document is neither a list of records nor a column mapping.
    #[error("unexpected JSON layout in {location}: {reason}")]
    JsonLayout { location: String, reason: String },

    /// Object location has no `.csv` or `.json` extension.
    #[error("unsupported object format: {location}")]
    UnsupportedFormat { location: String },

    /// Source produced no rows.
    #[error("no rows extracted from {location}")]
    Empty { location: String },

    // === Network Errors ===
    /// Failed to build the HTTP client or send a request.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Store API answered without the expected field.
    #[error("unexpected response from {url}: {reason}")]
    UnexpectedResponse { url: String, reason: String },

    /// Malformed `s3://` URI.
    #[error("invalid S3 URI '{uri}'")]
    InvalidS3Uri { uri: String },

    // === Database Errors ===
    #[error("database error: {0}")]
    Database(#[from] postgres::Error),

    // === PDF Errors ===
    /// PDF table extractor could not be started.
    #[error("failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// PDF table extractor exited with an error.
    #[error("'{command}' failed on {path}: {stderr}")]
    CommandFailed {
        command: String,
        path: String,
        stderr: String,
    },

    // === DataFrame Errors ===
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, IngestError>;
