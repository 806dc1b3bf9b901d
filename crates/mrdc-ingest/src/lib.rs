//! Extractors for the retail data centre sources.
//!
//! Each source kind sits behind a trait so the pipeline can be driven by
//! in-memory fakes in tests:
//!
//! - [`DatabaseSource`]: whole tables from PostgreSQL ([`PostgresSource`])
//! - [`PdfSource`]: tables embedded in PDFs ([`TabulaPdfSource`])
//! - [`ObjectSource`]: CSV and JSON objects ([`ObjectStoreSource`])
//! - [`StoreApi`]: the paginated store API ([`StoreApiClient`])
//!
//! Every extractor returns a [`polars::prelude::DataFrame`].

pub mod api;
mod csv_table;
pub mod database;
pub mod error;
mod http;
pub mod json;
pub mod object;
pub mod pdf;
pub mod table;

pub use api::{
    DEFAULT_REQUESTS_PER_SECOND, StoreApi, StoreApiClient, Throttle, fetch_store_range,
    parse_store_count,
};
pub use csv_table::read_csv_bytes;
pub use database::{ColumnKind, DatabaseSource, PostgresSource};
pub use error::{IngestError, Result};
pub use json::{frame_from_json, frame_from_records, read_json_bytes};
pub use object::{
    ObjectFormat, ObjectSource, ObjectStoreSource, https_to_s3_uri, s3_uri_to_https,
};
pub use pdf::{DEFAULT_TABULA_COMMAND, PdfSource, TabulaPdfSource, split_tables};
pub use table::TextTable;
