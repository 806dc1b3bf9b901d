//! Product weight parsing and conversion to kilograms.
//!
//! Weights arrive as text such as `1.5kg`, `400g`, `16oz`, `500ml` or
//! multipacks like `12 x 100g`. Multipacks and millilitre values are first
//! rewritten in grams, then every value is converted to kilograms.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::numeric::integer_runs;

const KILOGRAMS_PER_OUNCE: f64 = 0.028_349_523_125;

static QUANTITY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*([A-Za-z]+)").ok());

/// Units a product weight may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilograms,
    Grams,
    Millilitres,
    Ounces,
    /// `<count> x <grams>` multipacks.
    Multipack,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 5] = [
        WeightUnit::Kilograms,
        WeightUnit::Grams,
        WeightUnit::Millilitres,
        WeightUnit::Ounces,
        WeightUnit::Multipack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Grams => "g",
            WeightUnit::Millilitres => "ml",
            WeightUnit::Ounces => "oz",
            WeightUnit::Multipack => "x",
        }
    }

    /// Exact match on the unit token; `KG` is not a unit.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == token)
    }

    /// Kilograms per unit for units that convert directly.
    fn kilograms_per_unit(self) -> Option<f64> {
        match self {
            WeightUnit::Kilograms => Some(1.0),
            WeightUnit::Grams | WeightUnit::Millilitres => Some(0.001),
            WeightUnit::Ounces => Some(KILOGRAMS_PER_OUNCE),
            WeightUnit::Multipack => None,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First run of ASCII letters in the weight text.
pub fn unit_token(weight: &str) -> Option<String> {
    let start = weight.find(|c: char| c.is_ascii_alphabetic())?;
    Some(
        weight[start..]
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .collect(),
    )
}

/// Rewrites a multipack or millilitre weight in grams.
///
/// The product of the first two integers is used when there are two,
/// otherwise the single integer.
pub fn expand_to_grams(weight: &str) -> Option<String> {
    let grams = match integer_runs(weight).as_slice() {
        [] => return None,
        [count, each, ..] => count.checked_mul(*each)?,
        [single] => *single,
    };
    Some(format!("{grams}g"))
}

/// Converts a `<number><unit>` weight to kilograms.
pub fn to_kilograms(weight: &str) -> Option<f64> {
    let captures = QUANTITY.as_ref()?.captures(weight)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = WeightUnit::from_token(captures.get(2)?.as_str())?;
    Some(amount * unit.kilograms_per_unit()?)
}

/// Full weight normalization for one value given its unit token.
///
/// Returns `None` when the unit is known but the value cannot be converted.
pub fn normalize_weight(weight: &str, unit: WeightUnit) -> Option<f64> {
    match unit {
        WeightUnit::Multipack | WeightUnit::Millilitres => to_kilograms(&expand_to_grams(weight)?),
        _ => to_kilograms(weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_unit_token() {
        assert_eq!(unit_token("12 x 100g").as_deref(), Some("x"));
        assert_eq!(unit_token("1.5kg").as_deref(), Some("kg"));
        assert_eq!(unit_token("77g .").as_deref(), Some("g"));
        assert_eq!(unit_token("9GO9NZ5JTL"), Some("GO".to_string()));
        assert_eq!(unit_token("100"), None);
    }

    #[test]
    fn test_multipack() {
        assert_eq!(expand_to_grams("12 x 100g").as_deref(), Some("1200g"));
        assert!(approx(normalize_weight("12 x 100g", WeightUnit::Multipack), 1.2));
    }

    #[test]
    fn test_millilitres() {
        assert_eq!(expand_to_grams("500ml").as_deref(), Some("500g"));
        assert!(approx(normalize_weight("500ml", WeightUnit::Millilitres), 0.5));
    }

    #[test]
    fn test_direct_units() {
        assert!(approx(normalize_weight("1.5kg", WeightUnit::Kilograms), 1.5));
        assert!(approx(normalize_weight("400g", WeightUnit::Grams), 0.4));
        assert!(approx(normalize_weight("16oz", WeightUnit::Ounces), 0.45359237));
    }

    #[test]
    fn test_unconvertible() {
        assert_eq!(normalize_weight("kg", WeightUnit::Kilograms), None);
        assert_eq!(normalize_weight("ml", WeightUnit::Millilitres), None);
        assert_eq!(WeightUnit::from_token("KG"), None);
    }
}
