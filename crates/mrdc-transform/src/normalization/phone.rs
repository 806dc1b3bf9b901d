//! Phone number formatting to E.164.

use phonenumber::{Mode, country};

/// Formats a phone number as E.164 using `region` as the default country.
///
/// An unknown region still formats numbers written with a `+` prefix.
/// Returns `None` when the number cannot be parsed.
pub fn format_e164(raw: &str, region: Option<&str>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let region = region.and_then(|code| code.trim().to_ascii_uppercase().parse::<country::Id>().ok());
    let number = phonenumber::parse(region, trimmed).ok()?;
    Some(number.format().mode(Mode::E164).to_string())
}
