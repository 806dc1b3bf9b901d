//! Raw text tables and their conversion to frames.
//!
//! Every extractor that yields untyped cells (CSV, PDF) builds a
//! [`TextTable`] first. Headers are normalized the same way for all of them:
//! blank headers become `Unnamed: <position>` and repeated names get a `.N`
//! suffix, matching what analysts see in exported spreadsheets.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, NamedFrom};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Names blank headers by position and suffixes duplicates.
pub(crate) fn unique_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let mut name = normalize_header(header);
            if name.is_empty() {
                name = format!("Unnamed: {idx}");
            }
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                name = format!("{name}.{}", *count - 1);
            }
            name
        })
        .collect()
}

impl TextTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adds a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Stacks tables on top of each other.
    ///
    /// Columns are the union of all headers in order of first appearance;
    /// cells a table does not have are null.
    pub fn concat(tables: Vec<TextTable>) -> TextTable {
        let mut headers: Vec<String> = Vec::new();
        for table in &tables {
            for header in &table.headers {
                if !headers.contains(header) {
                    headers.push(header.clone());
                }
            }
        }
        let mut combined = TextTable::new(headers);
        for table in tables {
            let positions: Vec<usize> = table
                .headers
                .iter()
                .filter_map(|h| combined.headers.iter().position(|c| c == h))
                .collect();
            for row in table.rows {
                let mut out = vec![None; combined.headers.len()];
                for (value, &pos) in row.into_iter().zip(&positions) {
                    out[pos] = value;
                }
                combined.rows.push(out);
            }
        }
        combined
    }

    /// Builds a frame of text columns.
    pub fn into_frame(self) -> Result<DataFrame> {
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(self.rows.len()); self.headers.len()];
        for row in self.rows {
            for (idx, value) in row.into_iter().enumerate() {
                columns[idx].push(value);
            }
        }
        let columns: Vec<Column> = self
            .headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}
