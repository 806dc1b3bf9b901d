//! Free-form date and time parsing.
//!
//! Source tables mix ISO dates, slash dates, compact `YYYYMMDD` values and
//! month names in any token order (`1968 October 16`, `January 1951 27`).
//! Everything that parses is written back as `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M", "%I:%M:%S %p"];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Filler words that may sit between date parts.
const SKIP_WORDS: [&str; 7] = ["at", "on", "and", "of", "the", "am", "pm"];

/// Earliest year accepted; year 0 and negative years are rejected.
const MIN_YEAR: i32 = 1;

/// Parses a free-form date. Time components are ignored.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_date_forms(trimmed).filter(|date| date.year() >= MIN_YEAR)
}

fn parse_date_forms(trimmed: &str) -> Option<NaiveDate> {
    if starts_with_year(trimmed) {
        for fmt in &DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(d);
            }
        }
        for fmt in &DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        }
    }
    if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok();
    }

    parse_date_tokens(trimmed)
}

fn starts_with_year(value: &str) -> bool {
    value.len() > 4
        && value.as_bytes()[..4].iter().all(u8::is_ascii_digit)
        && !value.as_bytes()[4].is_ascii_digit()
}

/// Rewrites a free-form date as `YYYY-MM-DD`; `None` if it cannot be parsed.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_date(value).map(format_date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a time of day, alone or as part of a datetime.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in &TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Some(t);
        }
    }
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.time());
        }
    }
    None
}

/// Rewrites a time or datetime as `HH:MM:SS`.
pub fn normalize_time(value: &str) -> Option<String> {
    parse_time(value).map(|t| t.format("%H:%M:%S").to_string())
}

/// Strict `MM/YY` to `YYYY-MM`.
///
/// Two-digit years `00`-`68` land in the 2000s and `69`-`99` in the 1900s.
pub fn month_year_to_year_month(value: &str) -> Option<String> {
    let (month, year) = value.trim().split_once('/')?;
    if month.is_empty()
        || month.len() > 2
        || year.len() != 2
        || !month.bytes().all(|b| b.is_ascii_digit())
        || !year.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = expand_two_digit_year(year.parse().ok()?);
    Some(format!("{year:04}-{month:02}"))
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year <= 68 { 2000 + year } else { 1900 + year }
}

fn month_from_name(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| *name == lower || (lower.len() >= 3 && name.starts_with(&lower)))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

fn is_weekday(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.len() >= 3 && WEEKDAYS.iter().any(|day| day.starts_with(&lower))
}

/// Strips an ordinal suffix (`1st`, `22nd`, `3rd`, `4th`).
fn strip_ordinal(token: &str) -> &str {
    let lower = token.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if lower.ends_with(suffix) {
            let digits = &token[..token.len() - suffix.len()];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return digits;
            }
        }
    }
    token
}

fn parse_date_tokens(value: &str) -> Option<NaiveDate> {
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut numbers: Vec<u32> = Vec::new();

    // Whitespace-separated pieces holding ':' are times of day.
    let date_part = value
        .split_whitespace()
        .filter(|piece| !piece.contains(':'))
        .collect::<Vec<_>>()
        .join(" ");

    for token in date_part
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let token = strip_ordinal(token);
        if token.bytes().all(|b| b.is_ascii_digit()) {
            if token.len() == 4 {
                if year.is_some() {
                    return None;
                }
                year = Some(token.parse().ok()?);
            } else if token.len() <= 2 {
                numbers.push(token.parse().ok()?);
            } else {
                return None;
            }
        } else if let Some(m) = month_from_name(token) {
            if month.is_some() {
                return None;
            }
            month = Some(m);
        } else if is_weekday(token) || SKIP_WORDS.contains(&token.to_lowercase().as_str()) {
            continue;
        } else {
            return None;
        }
    }

    let (year, month, day) = match (year, month, numbers.as_slice()) {
        (Some(y), Some(m), []) => (y, m, 1),
        (Some(y), Some(m), [d]) => (y, m, *d),
        (Some(y), None, [m]) => (y, *m, 1),
        (Some(y), None, [a, b]) => {
            let (m, d) = month_day(*a, *b);
            (y, m, d)
        }
        (None, Some(m), [d, y]) => (expand_two_digit_year(i32::try_from(*y).ok()?), m, *d),
        (None, None, [a, b, y]) => {
            let (m, d) = month_day(*a, *b);
            (expand_two_digit_year(i32::try_from(*y).ok()?), m, d)
        }
        _ => return None,
    };
    if year < MIN_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Orders two bare numbers as (month, day): month first unless only the
/// second can be a month.
fn month_day(a: u32, b: u32) -> (u32, u32) {
    if a > 12 && b <= 12 { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_forms() {
        assert_eq!(normalize_date("2005-11-26").as_deref(), Some("2005-11-26"));
        assert_eq!(normalize_date("2005/11/26").as_deref(), Some("2005-11-26"));
        assert_eq!(normalize_date("20051126").as_deref(), Some("2005-11-26"));
        assert_eq!(
            normalize_date("2005-11-26 22:00:06").as_deref(),
            Some("2005-11-26")
        );
        assert_eq!(
            normalize_date("2005-11-26T22:00:06.123").as_deref(),
            Some("2005-11-26")
        );
    }

    #[test]
    fn test_month_names_in_any_order() {
        assert_eq!(normalize_date("1968 October 16").as_deref(), Some("1968-10-16"));
        assert_eq!(normalize_date("January 1951 27").as_deref(), Some("1951-01-27"));
        assert_eq!(normalize_date("July 1961 14").as_deref(), Some("1961-07-14"));
        assert_eq!(normalize_date("2016 May 07").as_deref(), Some("2016-05-07"));
        assert_eq!(normalize_date("15 Jan 2024").as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date("Sept 3rd, 2001").as_deref(), Some("2001-09-03"));
    }

    #[test]
    fn test_unpadded_parts() {
        assert_eq!(normalize_date("2020-9-5").as_deref(), Some("2020-09-05"));
        assert_eq!(normalize_date("1993-10-2").as_deref(), Some("1993-10-02"));
    }

    #[test]
    fn test_slash_forms() {
        assert_eq!(normalize_date("01/15/2024").as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date("15/01/2024").as_deref(), Some("2024-01-15"));
        assert_eq!(normalize_date("03/04/2024").as_deref(), Some("2024-03-04"));
        assert_eq!(normalize_date("10/11/12").as_deref(), Some("2012-10-11"));
    }

    #[test]
    fn test_missing_day_defaults_to_first() {
        assert_eq!(normalize_date("October 2003").as_deref(), Some("2003-10-01"));
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("GFVY5ASK0R"), None);
        assert_eq!(normalize_date("NULL"), None);
        assert_eq!(normalize_date("2005-02-30"), None);
        assert_eq!(normalize_date("12345"), None);
    }

    #[test]
    fn test_year_zero_is_rejected() {
        assert_eq!(normalize_date("0000 May 5"), None);
        assert_eq!(normalize_date("May 5 0000"), None);
        assert_eq!(normalize_date("0000-05-05"), None);
        assert_eq!(normalize_date("00000505"), None);
        assert_eq!(normalize_date("0001 May 5").as_deref(), Some("0001-05-05"));
    }

    #[test]
    fn test_month_year() {
        assert_eq!(month_year_to_year_month("09/26").as_deref(), Some("2026-09"));
        assert_eq!(month_year_to_year_month("12/68").as_deref(), Some("2068-12"));
        assert_eq!(month_year_to_year_month("01/69").as_deref(), Some("1969-01"));
        assert_eq!(month_year_to_year_month("13/22"), None);
        assert_eq!(month_year_to_year_month("2022-09"), None);
        assert_eq!(month_year_to_year_month("09/2026"), None);
    }

    #[test]
    fn test_time() {
        assert_eq!(normalize_time("22:00:06").as_deref(), Some("22:00:06"));
        assert_eq!(normalize_time("09:05").as_deref(), Some("09:05:00"));
        assert_eq!(normalize_time("17:29:45.123").as_deref(), Some("17:29:45"));
        assert_eq!(
            normalize_time("2005-11-26 08:15:00").as_deref(),
            Some("08:15:00")
        );
        assert_eq!(normalize_time("SAAZHF87TI"), None);
    }
}
