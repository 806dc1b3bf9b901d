//! Continent codes and names.

use std::fmt;
use std::str::FromStr;

use crate::error::StandardsError;

/// Name written when a country code has no continent.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    /// Two-letter continent code (`AF`, `AN`, `AS`, `EU`, `NA`, `OC`, `SA`).
    pub fn code(self) -> &'static str {
        match self {
            Continent::Africa => "AF",
            Continent::Antarctica => "AN",
            Continent::Asia => "AS",
            Continent::Europe => "EU",
            Continent::NorthAmerica => "NA",
            Continent::Oceania => "OC",
            Continent::SouthAmerica => "SA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Antarctica => "Antarctica",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Continent {
    type Err = StandardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AF" => Ok(Continent::Africa),
            "AN" => Ok(Continent::Antarctica),
            "AS" => Ok(Continent::Asia),
            "EU" => Ok(Continent::Europe),
            "NA" => Ok(Continent::NorthAmerica),
            "OC" => Ok(Continent::Oceania),
            "SA" => Ok(Continent::SouthAmerica),
            _ => Err(StandardsError::InvalidValue {
                field: "continent",
                value: s.to_string(),
                table: "countries",
            }),
        }
    }
}

/// Continent name for a two-letter country code, or [`UNKNOWN_CONTINENT`].
pub fn continent_name_for_alpha2(code: &str) -> &'static str {
    crate::countries::countries()
        .by_alpha2(code)
        .map_or(UNKNOWN_CONTINENT, |country| country.continent.name())
}
