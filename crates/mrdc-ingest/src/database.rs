//! Relational database extraction.

use mrdc_common::quote_identifier;
use mrdc_model::ConnectionParams;
use polars::prelude::{Column, DataFrame, NamedFrom};
use postgres::types::Type;
use postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, info};

use crate::error::Result;

/// A database the pipeline can read whole tables from.
pub trait DatabaseSource {
    /// Tables in the source's default schema.
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Reads every row of `table`.
    fn read_table(&mut self, table: &str) -> Result<DataFrame>;
}

/// How a source column is stored in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Integers map to `Int64`, floating point and numeric to `Float64`,
    /// booleans to `Boolean`; dates, timestamps and everything else are text.
    pub fn for_type(ty: &Type) -> Self {
        if *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8 || *ty == Type::OID {
            ColumnKind::Int
        } else if *ty == Type::FLOAT4 || *ty == Type::FLOAT8 || *ty == Type::NUMERIC {
            ColumnKind::Float
        } else if *ty == Type::BOOL {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    /// Builds a column from the text form PostgreSQL sends for each cell.
    ///
    /// Cells that do not parse as the column's type are null.
    pub fn column(self, name: &str, cells: Vec<Option<String>>) -> Column {
        match self {
            ColumnKind::Int => {
                let values: Vec<Option<i64>> = cells
                    .iter()
                    .map(|c| c.as_deref().and_then(|v| v.parse().ok()))
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = cells
                    .iter()
                    .map(|c| c.as_deref().and_then(|v| v.parse().ok()))
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Bool => {
                let values: Vec<Option<bool>> = cells
                    .iter()
                    .map(|c| match c.as_deref() {
                        Some("t" | "true") => Some(true),
                        Some("f" | "false") => Some(false),
                        _ => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Text => Column::new(name.into(), cells),
        }
    }
}

pub struct PostgresSource {
    client: Client,
}

impl PostgresSource {
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        info!(connection = %params.connection_string_masked(), "connecting to source database");
        let client = Client::connect(&params.connection_string(), NoTls)?;
        Ok(Self { client })
    }
}

impl DatabaseSource for PostgresSource {
    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows = self.client.query(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema = 'public' ORDER BY table_name",
            &[],
        )?;
        let tables = rows
            .iter()
            .map(|row| row.try_get::<_, String>(0))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        info!(tables = ?tables, "source database tables");
        Ok(tables)
    }

    fn read_table(&mut self, table: &str) -> Result<DataFrame> {
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let statement = self.client.prepare(&sql)?;
        let kinds: Vec<(String, ColumnKind)> = statement
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), ColumnKind::for_type(c.type_())))
            .collect();

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); kinds.len()];
        for message in self.client.simple_query(&sql)? {
            if let SimpleQueryMessage::Row(row) = message {
                for (idx, column) in cells.iter_mut().enumerate() {
                    column.push(row.get(idx).map(str::to_string));
                }
            }
        }

        let columns: Vec<Column> = kinds
            .into_iter()
            .zip(cells)
            .map(|((name, kind), values)| kind.column(&name, values))
            .collect();
        let df = DataFrame::new(columns)?;
        debug!(table, rows = df.height(), columns = df.width(), "read table");
        Ok(df)
    }
}
