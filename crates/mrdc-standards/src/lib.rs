//! Reference lookup tables for the retail data centre pipeline.
//!
//! - [`countries`]: ISO 3166-1 names and codes, embedded at compile time
//! - [`continents`]: continent codes and the country to continent mapping
//! - [`card_patterns`]: compiled card number formats per provider
//!
//! Every table is built once per process and is read-only afterwards.

pub mod card_patterns;
pub mod continents;
pub mod countries;
pub mod error;

pub use card_patterns::{CardCheck, card_pattern, check_card, pattern_source};
pub use continents::{Continent, UNKNOWN_CONTINENT, continent_name_for_alpha2};
pub use countries::{Country, CountryTable, UNRESOLVED_COUNTRY, countries};
pub use error::{Result, StandardsError};
