//! Consistency checks across the reference tables.

use std::collections::HashSet;

use mrdc_standards::{UNKNOWN_CONTINENT, continent_name_for_alpha2, countries};

#[test]
fn alpha2_codes_are_unique_and_upper_case() {
    let mut seen = HashSet::new();
    for country in countries().iter() {
        assert_eq!(country.alpha2, country.alpha2.to_ascii_uppercase());
        assert_eq!(country.alpha3.len(), 3, "{}", country.name);
        assert!(seen.insert(country.alpha2.clone()), "duplicate {}", country.alpha2);
    }
}

#[test]
fn every_country_maps_to_a_named_continent() {
    for country in countries().iter() {
        assert_ne!(continent_name_for_alpha2(&country.alpha2), UNKNOWN_CONTINENT);
    }
}

#[test]
fn store_countries_resolve() {
    for (code, continent) in [("GB", "Europe"), ("DE", "Europe"), ("US", "North America")] {
        assert!(countries().is_valid_alpha2(code));
        assert_eq!(continent_name_for_alpha2(code), continent);
    }
    assert!(!countries().is_valid_alpha2("GGB"));
}
