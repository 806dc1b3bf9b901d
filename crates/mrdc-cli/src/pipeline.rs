//! Extract, clean and load, one table at a time.
//!
//! Every table goes through three stages:
//! 1. **Extract**: read the raw rows from the table's source
//! 2. **Clean**: run the table's cleaner under the configured error policy
//! 3. **Load**: replace the destination table through the sink
//!
//! A table that fails a stage is reported with that stage and the run moves
//! on to the next table. Sources are injected so the whole pipeline can be
//! driven by in-memory fakes.

use std::fmt;
use std::ops::RangeInclusive;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use mrdc_common::{longest_value_len, null_percentages};
use mrdc_core::clean_table;
use mrdc_ingest::{
    DEFAULT_REQUESTS_PER_SECOND, DatabaseSource, IngestError, ObjectSource, PdfSource, StoreApi,
    Throttle, fetch_store_range,
};
use mrdc_model::{CleanReport, CleaningOptions, TableKind, TableSource};
use mrdc_output::TableSink;

/// A source that may have failed to initialize.
///
/// The error message is reported against every table that needs the source.
pub type SourceSlot<T> = std::result::Result<Box<T>, String>;

/// Where the non-database sources live.
#[derive(Debug, Clone, Default)]
pub struct SourceLocations {
    pub card_details_pdf: Option<String>,
    pub products: Option<String>,
    pub date_details: Option<String>,
    pub first_store: usize,
    /// Defaults to the API's store count minus one.
    pub last_store: Option<usize>,
    pub requests_per_second: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Clean,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => f.write_str("extract"),
            Stage::Clean => f.write_str("clean"),
            Stage::Load => f.write_str("load"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableFailure {
    pub stage: Stage,
    pub message: String,
}

/// Outcome of one table.
#[derive(Debug, Clone)]
pub struct TableResult {
    pub table: TableKind,
    pub rows_extracted: Option<usize>,
    pub report: Option<CleanReport>,
    /// Longest value of each width-sensitive column after cleaning.
    pub column_widths: Vec<(String, Option<usize>)>,
    pub failure: Option<TableFailure>,
}

impl TableResult {
    fn new(table: TableKind) -> Self {
        Self {
            table,
            rows_extracted: None,
            report: None,
            column_widths: Vec::new(),
            failure: None,
        }
    }

    fn failed(mut self, stage: Stage, message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(table = %self.table, %stage, error = %message, "table failed");
        self.failure = Some(TableFailure { stage, message });
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub tables: Vec<TableResult>,
    /// Where the tables were loaded, for display.
    pub destination: String,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.tables.iter().any(|result| !result.is_loaded())
    }

    pub fn failed_tables(&self) -> impl Iterator<Item = &TableResult> {
        self.tables.iter().filter(|result| !result.is_loaded())
    }
}

pub struct Pipeline {
    database: SourceSlot<dyn DatabaseSource>,
    pdf: SourceSlot<dyn PdfSource>,
    objects: SourceSlot<dyn ObjectSource>,
    store_api: SourceSlot<dyn StoreApi>,
    locations: SourceLocations,
    sink: Box<dyn TableSink>,
    options: CleaningOptions,
}

impl Pipeline {
    /// Creates a pipeline with no sources; tables fail extraction until the
    /// matching source is set.
    pub fn new(sink: Box<dyn TableSink>, options: CleaningOptions) -> Self {
        Self {
            database: Err("no source database configured".to_string()),
            pdf: Err("no PDF reader configured".to_string()),
            objects: Err("no object reader configured".to_string()),
            store_api: Err("no store API configured".to_string()),
            locations: SourceLocations::default(),
            sink,
            options,
        }
    }

    pub fn with_database(mut self, database: SourceSlot<dyn DatabaseSource>) -> Self {
        self.database = database;
        self
    }

    pub fn with_pdf(mut self, pdf: SourceSlot<dyn PdfSource>) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn with_objects(mut self, objects: SourceSlot<dyn ObjectSource>) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_store_api(mut self, store_api: SourceSlot<dyn StoreApi>) -> Self {
        self.store_api = store_api;
        self
    }

    pub fn with_locations(mut self, locations: SourceLocations) -> Self {
        self.locations = locations;
        self
    }

    /// Runs every table in order. Failures are collected, never returned.
    pub fn run(&mut self, tables: &[TableKind]) -> Vec<TableResult> {
        tables.iter().map(|&table| self.run_table(table)).collect()
    }

    pub fn run_table(&mut self, table: TableKind) -> TableResult {
        let span = info_span!("table", table = %table, destination = table.destination());
        let _guard = span.enter();
        let result = TableResult::new(table);

        let frame = match self.extract(table) {
            Ok(frame) => frame,
            Err(message) => return result.failed(Stage::Extract, message),
        };
        let mut result = TableResult {
            rows_extracted: Some(frame.height()),
            ..result
        };
        info!(rows = frame.height(), columns = frame.width(), "extracted");
        for (column, percent) in null_percentages(&frame) {
            debug!(column = %column, null_percent = percent, "null share before cleaning");
        }

        let cleaned = match clean_table(table, frame, &self.options) {
            Ok(cleaned) => cleaned,
            Err(error) => return result.failed(Stage::Clean, error.to_string()),
        };
        result.column_widths = table
            .width_sensitive_columns()
            .iter()
            .map(|&column| (column.to_string(), longest_value_len(&cleaned.frame, column)))
            .collect();
        result.report = Some(cleaned.report);

        let load_span = info_span!("load");
        let _load_guard = load_span.enter();
        if let Err(error) = self.sink.replace_table(&cleaned.frame, table.destination()) {
            return result.failed(Stage::Load, error.to_string());
        }
        info!(rows = cleaned.frame.height(), "loaded");
        result
    }

    /// Reads the raw rows for `table` from its source.
    pub fn extract(&mut self, table: TableKind) -> std::result::Result<DataFrame, String> {
        let source = table.source();
        let span = info_span!("extract", %source);
        let _guard = span.enter();
        match source {
            TableSource::Database { table: name } => {
                let database = self.database.as_mut().map_err(|message| message.clone())?;
                database.read_table(name).map_err(describe)
            }
            TableSource::CardPdf => {
                let pdf = self.pdf.as_ref().map_err(|message| message.clone())?;
                let location = required(&self.locations.card_details_pdf, "card_details_pdf")?;
                pdf.read_pdf(location).map_err(describe)
            }
            TableSource::ProductsObject => {
                let objects = self.objects.as_ref().map_err(|message| message.clone())?;
                let location = required(&self.locations.products, "products")?;
                objects.read_object(location).map_err(describe)
            }
            TableSource::DateDetailsObject => {
                let objects = self.objects.as_ref().map_err(|message| message.clone())?;
                let location = required(&self.locations.date_details, "date_details")?;
                objects.read_object(location).map_err(describe)
            }
            TableSource::StoreApi => {
                let api = self.store_api.as_ref().map_err(|message| message.clone())?;
                let range = store_range(&**api, &self.locations).map_err(describe)?;
                let mut throttle = Throttle::per_second(
                    self.locations
                        .requests_per_second
                        .unwrap_or(DEFAULT_REQUESTS_PER_SECOND),
                );
                fetch_store_range(&**api, range, &mut throttle).map_err(describe)
            }
        }
    }
}

fn store_range(
    api: &dyn StoreApi,
    locations: &SourceLocations,
) -> mrdc_ingest::Result<RangeInclusive<usize>> {
    let last = match locations.last_store {
        Some(last) => last,
        None => {
            let count = api.fetch_count()?;
            info!(count, "store count fetched");
            if count == 0 {
                return Err(IngestError::Empty {
                    location: "store API".to_string(),
                });
            }
            count - 1
        }
    };
    Ok(locations.first_store..=last)
}

fn required<'a>(location: &'a Option<String>, key: &str) -> std::result::Result<&'a str, String> {
    location
        .as_deref()
        .ok_or_else(|| format!("sources.{key} is not configured"))
}

fn describe(error: IngestError) -> String {
    error.to_string()
}
