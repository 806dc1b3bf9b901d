//! Table sinks.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use mrdc_model::ConnectionParams;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use postgres::{Client, NoTls};
use tracing::info;

use crate::error::{LoadError, Result};
use crate::sql::{copy_sql, create_table_sql, drop_table_sql};

/// Destination for cleaned tables.
pub trait TableSink {
    /// Replaces `table` with the contents of `df`.
    fn replace_table(&mut self, df: &DataFrame, table: &str) -> Result<()>;
}

/// Writes a frame as CSV with a header line. Nulls are empty fields.
fn write_csv<W: std::io::Write>(writer: W, df: &DataFrame, table: &str) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut df)
        .map_err(|source| LoadError::CsvWrite {
            table: table.to_string(),
            source,
        })
}

/// Writes a frame to a CSV file, replacing it if it exists.
pub fn write_csv_file(path: &Path, df: &DataFrame, table: &str) -> Result<()> {
    let file = File::create(path).map_err(|source| LoadError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, df, table)
}

/// PostgreSQL warehouse.
///
/// Each table is dropped, recreated from the frame's schema and filled with
/// `COPY` inside one transaction, so readers see either the old table or the
/// new one.
pub struct WarehouseSink {
    client: Client,
}

impl WarehouseSink {
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        info!(connection = %params.connection_string_masked(), "connecting to warehouse");
        let client = Client::connect(&params.connection_string(), NoTls)?;
        Ok(Self { client })
    }
}

impl TableSink for WarehouseSink {
    fn replace_table(&mut self, df: &DataFrame, table: &str) -> Result<()> {
        let mut transaction = self.client.transaction()?;
        transaction.batch_execute(&format!(
            "{};\n{};",
            drop_table_sql(table),
            create_table_sql(table, df)
        ))?;
        let mut writer = transaction.copy_in(&copy_sql(table, df))?;
        write_csv(&mut writer, df, table)?;
        let rows = writer.finish()?;
        transaction.commit()?;
        info!(table, rows, "table replaced");
        Ok(())
    }
}

/// Writes each table to `<dir>/<table>.csv`, replacing any earlier file.
#[derive(Debug, Clone)]
pub struct CsvDirectorySink {
    dir: PathBuf,
}

impl CsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.csv"))
    }
}

impl TableSink for CsvDirectorySink {
    fn replace_table(&mut self, df: &DataFrame, table: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| LoadError::FileWrite {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.table_path(table);
        write_csv_file(&path, df, table)?;
        info!(table, path = %path.display(), rows = df.height(), "table written");
        Ok(())
    }
}
