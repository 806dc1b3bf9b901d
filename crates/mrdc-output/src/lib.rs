//! Loaders for cleaned tables.
//!
//! A [`TableSink`] replaces a destination table wholesale. The warehouse sink
//! writes to PostgreSQL; the CSV directory sink writes one file per table and
//! is used for dry runs.

pub mod error;
pub mod sink;
pub mod sql;

pub use error::{LoadError, Result};
pub use sink::{CsvDirectorySink, TableSink, WarehouseSink, write_csv_file};
pub use sql::{copy_sql, create_table_sql, drop_table_sql, sql_type};
