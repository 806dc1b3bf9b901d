//! Text rewrites: capitalization, addresses and substring removal.

/// Title case: the first letter of every alphabetic run upper-cased, the rest
/// lower-cased.
///
/// ```
/// use mrdc_transform::normalization::text::title_case;
///
/// assert_eq!(title_case("mcDONALD"), "Mcdonald");
/// assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Joins the lines of a multi-line address with `", "`.
pub fn reformat_address(value: &str) -> String {
    value.replace("\r\n", ", ").replace('\n', ", ")
}

/// Removes every occurrence of `needle`.
pub fn strip_substring(value: &str, needle: &str) -> String {
    if needle.is_empty() {
        return value.to_string();
    }
    value.replace(needle, "")
}
