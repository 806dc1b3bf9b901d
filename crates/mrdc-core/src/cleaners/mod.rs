//! Per-table cleaners.
//!
//! Each cleaner is a fixed, ordered list of named steps run through a
//! [`StepRunner`]:
//!
//! | Table | Source | Key operations |
//! |-------|--------|----------------|
//! | users | `legacy_users` | dates, names, countries, E.164 phones |
//! | cards | card details PDF | expiry dates, card number validation |
//! | stores | store API | store types, country codes, continents |
//! | products | products CSV | weights in kg, prices, categories |
//! | orders | `orders_table` | personal columns removed |
//! | order_dates | date details JSON | combined dates, timestamps |

mod cards;
mod order_dates;
mod orders;
mod products;
mod stores;
mod users;

pub use order_dates::TIMESTAMP_SENTINEL;
pub use stores::{STORE_TYPES, WEB_PORTAL};

use mrdc_model::{CleaningOptions, TableKind};
use polars::prelude::DataFrame;
use tracing::info_span;

use crate::error::Result;
use crate::runner::{CleanedTable, StepRunner};

/// Cleans one extracted table.
///
/// Under [`ErrorPolicy::Continue`](mrdc_model::ErrorPolicy::Continue) failed
/// steps are listed in the report and the remaining steps still run.
pub fn clean_table(
    table: TableKind,
    frame: DataFrame,
    options: &CleaningOptions,
) -> Result<CleanedTable> {
    let span = info_span!("clean", table = %table);
    let _guard = span.enter();

    let mut runner = StepRunner::new(table, frame, options.error_policy);
    match table {
        TableKind::Users => users::clean_users(&mut runner)?,
        TableKind::Cards => cards::clean_cards(&mut runner)?,
        TableKind::Stores => stores::clean_stores(&mut runner)?,
        TableKind::Products => products::clean_products(&mut runner, options)?,
        TableKind::Orders => orders::clean_orders(&mut runner)?,
        TableKind::OrderDates => order_dates::clean_order_dates(&mut runner)?,
    }
    Ok(runner.finish())
}
