//! Tables embedded in PDF documents.
//!
//! Extraction is delegated to the tabula command line tool, run over every
//! page in stream mode with CSV output. Each page repeats the table header, so
//! the output is split wherever a header line appears again and the pieces
//! are stacked into one frame. Remote documents are downloaded to a temporary
//! file first.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::csv_table::read_csv_records;
use crate::error::{IngestError, Result};
use crate::http::{build_client, fetch_bytes, is_remote};
use crate::table::{TextTable, normalize_cell, unique_headers};

pub const DEFAULT_TABULA_COMMAND: &str = "tabula";

pub trait PdfSource {
    /// Reads every table in the document at `path` (a local path or URL).
    fn read_pdf(&self, path: &str) -> Result<DataFrame>;
}

pub struct TabulaPdfSource {
    command: String,
    client: Client,
}

impl TabulaPdfSource {
    pub fn new(command: impl Into<String>) -> Result<Self> {
        Ok(Self {
            command: command.into(),
            client: build_client()?,
        })
    }

    /// Runs tabula on a local file and returns its CSV output.
    fn run(&self, path: &Path, label: &str) -> Result<Vec<u8>> {
        let path_arg = path.to_string_lossy();
        let output = Command::new(&self.command)
            .args(Self::args(&path_arg))
            .output()
            .map_err(|source| IngestError::CommandSpawn {
                command: self.command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(IngestError::CommandFailed {
                command: self.command.clone(),
                path: label.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    fn args(path: &str) -> [&str; 6] {
        ["--pages", "all", "--stream", "--format", "CSV", path]
    }
}

impl PdfSource for TabulaPdfSource {
    fn read_pdf(&self, path: &str) -> Result<DataFrame> {
        info!(command = %self.command, path, "extracting PDF tables");
        let stdout = if is_remote(path) {
            let bytes = fetch_bytes(&self.client, path)?;
            let file_error = |source| IngestError::FileRead {
                path: path.into(),
                source,
            };
            let mut file = tempfile::Builder::new()
                .suffix(".pdf")
                .tempfile()
                .map_err(file_error)?;
            file.write_all(&bytes).map_err(file_error)?;
            file.flush().map_err(file_error)?;
            self.run(file.path(), path)?
        } else {
            self.run(Path::new(path), path)?
        };

        let records = read_csv_records(&stdout, path)?;
        let tables = split_tables(records);
        debug!(path, tables = tables.len(), "PDF tables found");
        let combined = TextTable::concat(tables);
        if combined.is_empty() {
            return Err(IngestError::Empty {
                location: path.to_string(),
            });
        }
        combined.into_frame()
    }
}

/// Splits stacked CSV output into tables at each header line.
///
/// The first non-blank record is the header. A later record is a header too
/// when every word in it is one of the first header's names; this catches
/// pages where the extractor merged two header cells into one.
pub fn split_tables(records: Vec<Vec<String>>) -> Vec<TextTable> {
    let mut records = records
        .into_iter()
        .filter(|record| record.iter().any(|cell| !cell.trim().is_empty()));
    let Some(first) = records.next() else {
        return Vec::new();
    };
    let known: Vec<String> = first
        .iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect();

    let mut tables = vec![TextTable::new(unique_headers(first.iter().map(String::as_str)))];
    for record in records {
        if is_header(&record, &known) {
            tables.push(TextTable::new(unique_headers(
                record.iter().map(String::as_str),
            )));
            continue;
        }
        let row = record.iter().map(|cell| normalize_cell(cell)).collect();
        if let Some(table) = tables.last_mut() {
            table.push_row(row);
        }
    }
    tables.retain(|table| !table.is_empty());
    tables
}

fn is_header(record: &[String], known: &[String]) -> bool {
    let mut words = record.iter().flat_map(|cell| cell.split_whitespace()).peekable();
    words.peek().is_some() && words.all(|word| known.iter().any(|k| k == word))
}
