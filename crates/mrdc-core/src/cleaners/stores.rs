//! Store details (REST API to `dim_store_details`).

use mrdc_transform::{
    extract_first_integer, fill_continents, keep_rows_in, normalize_dates, null_where_equals,
    reformat_address, revalidate_country_codes,
};

use crate::error::Result;
use crate::runner::StepRunner;

pub const STORE_TYPES: [&str; 5] = ["Web Portal", "Local", "Super Store", "Mall Kiosk", "Outlet"];

/// Store type of the online shop, which has no physical location.
pub const WEB_PORTAL: &str = "Web Portal";

pub(super) fn clean_stores(runner: &mut StepRunner) -> Result<()> {
    runner.drop_each(&["lat"])?;
    runner.step("keep known store_type", |df| {
        keep_rows_in(df, "store_type", &STORE_TYPES)
    })?;
    runner.step("validate country_code", |df| {
        revalidate_country_codes(df, "country_code")
    })?;
    runner.step("fill continent", |df| {
        fill_continents(df, "country_code", "continent")
    })?;
    runner.step("reformat address", |df| reformat_address(df, "address"))?;
    runner.step("normalize opening_date", |df| {
        normalize_dates(df, "opening_date")
    })?;
    runner.step("extract staff_numbers", |df| {
        extract_first_integer(df, "staff_numbers")
    })?;
    runner.step("clear web portal longitude", |df| {
        null_where_equals(df, "longitude", "store_type", WEB_PORTAL)
    })
}
