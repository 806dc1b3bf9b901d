//! Country name and code resolution against the ISO table.

use mrdc_standards::{UNRESOLVED_COUNTRY, continent_name_for_alpha2, countries};

/// Canonical ISO name for a free-form country name, or `"N/A"`.
pub fn resolve_country_name(value: Option<&str>) -> String {
    value
        .and_then(|name| countries().by_name(name))
        .map_or_else(|| UNRESOLVED_COUNTRY.to_string(), |c| c.name.clone())
}

/// Alpha-2 code for a country name, or `"N/A"`.
pub fn country_code_for_name(value: Option<&str>) -> String {
    value
        .and_then(|name| countries().by_name(name))
        .map_or_else(|| UNRESOLVED_COUNTRY.to_string(), |c| c.alpha2.clone())
}

/// Canonical alpha-2 code if the value is a known code, otherwise `"N/A"`.
pub fn revalidate_country_code(value: Option<&str>) -> String {
    value
        .and_then(|code| countries().by_alpha2(code))
        .map_or_else(|| UNRESOLVED_COUNTRY.to_string(), |c| c.alpha2.clone())
}

/// Continent name for an alpha-2 code, or `"Unknown"`.
pub fn continent_for_code(value: Option<&str>) -> &'static str {
    continent_name_for_alpha2(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_to_canonical_form() {
        assert_eq!(resolve_country_name(Some("GERMANY")), "Germany");
        assert_eq!(resolve_country_name(Some("Narnia")), "N/A");
        assert_eq!(resolve_country_name(None), "N/A");
    }

    #[test]
    fn codes_from_names() {
        assert_eq!(country_code_for_name(Some("United Kingdom")), "GB");
        assert_eq!(country_code_for_name(Some("N/A")), "N/A");
    }

    #[test]
    fn codes_are_revalidated() {
        assert_eq!(revalidate_country_code(Some("de")), "DE");
        assert_eq!(revalidate_country_code(Some("GGB")), "N/A");
        assert_eq!(revalidate_country_code(None), "N/A");
    }

    #[test]
    fn continents_from_codes() {
        assert_eq!(continent_for_code(Some("DE")), "Europe");
        assert_eq!(continent_for_code(Some("N/A")), "Unknown");
        assert_eq!(continent_for_code(None), "Unknown");
    }
}
