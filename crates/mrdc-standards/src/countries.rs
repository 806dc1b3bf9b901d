//! ISO 3166-1 country table.
//!
//! The table is embedded at compile time and parsed once per process.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::continents::Continent;
use crate::error::{Result, StandardsError};

/// Sentinel written when a country name or code cannot be resolved.
pub const UNRESOLVED_COUNTRY: &str = "N/A";

const COUNTRIES_CSV: &str = include_str!("../data/countries.csv");

static COUNTRY_TABLE: LazyLock<CountryTable> =
    LazyLock::new(|| CountryTable::from_csv(COUNTRIES_CSV).unwrap_or_default());

/// Process-wide country table.
pub fn countries() -> &'static CountryTable {
    &COUNTRY_TABLE
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub continent: Continent,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    name: String,
    alpha2: String,
    alpha3: String,
    continent: String,
}

/// Countries indexed by lower-cased name and upper-cased alpha-2 code.
#[derive(Debug, Default)]
pub struct CountryTable {
    countries: Vec<Country>,
    by_name: HashMap<String, usize>,
    by_alpha2: HashMap<String, usize>,
}

impl CountryTable {
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let mut table = CountryTable::default();
        for row in reader.deserialize::<CountryRow>() {
            let row = row.map_err(|source| StandardsError::CsvRead {
                table: "countries",
                source,
            })?;
            if row.alpha2.len() != 2 {
                return Err(StandardsError::InvalidValue {
                    field: "alpha2",
                    value: row.alpha2,
                    table: "countries",
                });
            }
            let continent = row.continent.parse::<Continent>()?;
            let idx = table.countries.len();
            table.by_name.insert(row.name.to_lowercase(), idx);
            table.by_alpha2.insert(row.alpha2.to_ascii_uppercase(), idx);
            table.countries.push(Country {
                name: row.name,
                alpha2: row.alpha2,
                alpha3: row.alpha3,
                continent,
            });
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    /// Case-insensitive exact match on the country name.
    pub fn by_name(&self, name: &str) -> Option<&Country> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.countries[idx])
    }

    /// Case-insensitive match on the alpha-2 code.
    pub fn by_alpha2(&self, code: &str) -> Option<&Country> {
        self.by_alpha2
            .get(&code.trim().to_ascii_uppercase())
            .map(|&idx| &self.countries[idx])
    }

    pub fn is_valid_alpha2(&self, code: &str) -> bool {
        self.by_alpha2.contains_key(code)
    }
}
