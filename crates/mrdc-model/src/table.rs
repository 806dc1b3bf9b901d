//! The six tables the pipeline knows how to extract, clean and load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A source table with a fixed cleaning pipeline and warehouse destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    OrderDates,
}

/// Where the raw rows for a table come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// A table in the source relational database.
    Database { table: &'static str },
    /// The card details PDF document.
    CardPdf,
    /// The paginated store details API.
    StoreApi,
    /// The products CSV in object storage.
    ProductsObject,
    /// The date details JSON in object storage.
    DateDetailsObject,
}

impl TableKind {
    /// All tables in load order.
    pub const ALL: [TableKind; 6] = [
        TableKind::Users,
        TableKind::Cards,
        TableKind::Stores,
        TableKind::Products,
        TableKind::Orders,
        TableKind::OrderDates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Users => "users",
            TableKind::Cards => "cards",
            TableKind::Stores => "stores",
            TableKind::Products => "products",
            TableKind::Orders => "orders",
            TableKind::OrderDates => "order_dates",
        }
    }

    /// Warehouse table the cleaned rows replace.
    pub fn destination(self) -> &'static str {
        match self {
            TableKind::Users => "dim_users",
            TableKind::Cards => "dim_card_details",
            TableKind::Stores => "dim_store_details",
            TableKind::Products => "dim_products",
            TableKind::Orders => "orders_table",
            TableKind::OrderDates => "dim_date_times",
        }
    }

    pub fn source(self) -> TableSource {
        match self {
            TableKind::Users => TableSource::Database {
                table: "legacy_users",
            },
            TableKind::Cards => TableSource::CardPdf,
            TableKind::Stores => TableSource::StoreApi,
            TableKind::Products => TableSource::ProductsObject,
            TableKind::Orders => TableSource::Database {
                table: "orders_table",
            },
            TableKind::OrderDates => TableSource::DateDetailsObject,
        }
    }

    /// Columns whose longest value sizes a fixed-width warehouse column.
    pub fn width_sensitive_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Users => &["country_code"],
            TableKind::Cards => &["card_number", "expiry_date"],
            TableKind::Stores => &["store_code", "country_code"],
            TableKind::Products => &["EAN", "product_code"],
            TableKind::Orders => &["card_number", "store_code", "product_code"],
            TableKind::OrderDates => &["date", "time_period", "timestamp", "date_uuid"],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "users" | "dim_users" => Ok(TableKind::Users),
            "cards" | "dim_card_details" => Ok(TableKind::Cards),
            "stores" | "dim_store_details" => Ok(TableKind::Stores),
            "products" | "dim_products" => Ok(TableKind::Products),
            "orders" | "orders_table" => Ok(TableKind::Orders),
            "order_dates" | "dates" | "dim_date_times" => Ok(TableKind::OrderDates),
            _ => Err(ModelError::UnknownTable(s.to_string())),
        }
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Database { table } => write!(f, "database table {table}"),
            TableSource::CardPdf => f.write_str("card details PDF"),
            TableSource::StoreApi => f.write_str("store details API"),
            TableSource::ProductsObject => f.write_str("object storage (products CSV)"),
            TableSource::DateDetailsObject => f.write_str("object storage (date details JSON)"),
        }
    }
}
