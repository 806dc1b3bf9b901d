//! Domain cleaners for the retail data centre tables.
//!
//! [`clean_table`] runs the cleaner for one [`TableKind`](mrdc_model::TableKind)
//! and returns the cleaned frame with a [`CleanReport`](mrdc_model::CleanReport).
//! The [`ErrorPolicy`](mrdc_model::ErrorPolicy) in the options decides whether
//! a failed step is recorded or aborts the table.

pub mod cleaners;
pub mod error;
pub mod runner;

pub use cleaners::{STORE_TYPES, TIMESTAMP_SENTINEL, WEB_PORTAL, clean_table};
pub use error::{CleanError, Result};
pub use runner::{CleanedTable, StepRunner};
