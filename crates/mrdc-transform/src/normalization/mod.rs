//! Value-level normalizers used by the frame transforms.
//!
//! - **datetime**: free-form dates, `MM/YY` expiry dates, times of day
//! - **text**: title case, address lines, substring removal
//! - **country**: ISO country names, codes and continents
//! - **phone**: E.164 phone formatting
//! - **weight**: product weights in kilograms
//! - **numeric**: integer extraction from noisy text

pub mod country;
pub mod datetime;
pub mod numeric;
pub mod phone;
pub mod text;
pub mod weight;

pub use country::{
    continent_for_code, country_code_for_name, resolve_country_name, revalidate_country_code,
};
pub use datetime::{month_year_to_year_month, normalize_date, normalize_time, parse_date};
pub use numeric::{digits_only, first_integer};
pub use phone::format_e164;
pub use text::{reformat_address, strip_substring, title_case};
pub use weight::{WeightUnit, normalize_weight, unit_token};
