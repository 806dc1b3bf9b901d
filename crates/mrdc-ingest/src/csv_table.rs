//! CSV reading.

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::table::{TextTable, normalize_cell, unique_headers};

/// Reads CSV bytes into a frame of text columns. Empty cells are null.
pub fn read_csv_bytes(bytes: &[u8], location: &str) -> Result<DataFrame> {
    read_csv_table(bytes, location)?.into_frame()
}

pub(crate) fn read_csv_table(bytes: &[u8], location: &str) -> Result<TextTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let parse_error = |source| IngestError::CsvParse {
        location: location.to_string(),
        source,
    };

    let headers = reader.headers().map_err(parse_error)?;
    let mut table = TextTable::new(unique_headers(headers.iter()));
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        table.push_row(record.iter().map(normalize_cell).collect());
    }
    Ok(table)
}

/// Reads raw CSV records with no header handling.
pub(crate) fn read_csv_records(bytes: &[u8], location: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|source| IngestError::CsvParse {
                    location: location.to_string(),
                    source,
                })
        })
        .collect()
}
