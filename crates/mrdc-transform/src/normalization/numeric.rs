//! Integer extraction from noisy text.

/// Keeps only the ASCII digits and parses them; empty or overflowing results
/// are `None`.
pub fn digits_only(value: &str) -> Option<i64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// First run of ASCII digits in the value.
pub fn first_integer(value: &str) -> Option<i64> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let run: String = value[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    run.parse::<i64>().ok()
}

/// Every run of ASCII digits in the value, in order.
pub fn integer_runs(value: &str) -> Vec<i64> {
    value
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<i64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("?4971858637664481"), Some(4971858637664481));
        assert_eq!(digits_only("4971-8586-3766"), Some(497185863766));
        assert_eq!(digits_only("NULL"), None);
        assert_eq!(digits_only("99999999999999999999999"), None);
    }

    #[test]
    fn test_first_integer() {
        assert_eq!(first_integer("J78"), Some(78));
        assert_eq!(first_integer("34"), Some(34));
        assert_eq!(first_integer("3n9"), Some(3));
        assert_eq!(first_integer("none"), None);
    }

    #[test]
    fn test_integer_runs() {
        assert_eq!(integer_runs("12 x 100g"), vec![12, 100]);
        assert_eq!(integer_runs("g"), Vec::<i64>::new());
    }
}
