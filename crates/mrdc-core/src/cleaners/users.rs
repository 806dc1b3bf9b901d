//! Users (`legacy_users` to `dim_users`).

use mrdc_transform::{
    drop_rows_with_any_null, fill_country_codes, format_phone_numbers, normalize_dates,
    reformat_address, resolve_country_names, title_case, to_text,
};

use crate::error::Result;
use crate::runner::StepRunner;

pub(super) fn clean_users(runner: &mut StepRunner) -> Result<()> {
    for column in ["date_of_birth", "join_date"] {
        runner.step(&format!("normalize {column}"), |df| {
            normalize_dates(df, column)
        })?;
    }
    for column in ["first_name", "last_name"] {
        runner.step(&format!("title case {column}"), |df| title_case(df, column))?;
    }
    runner.step("text email_address", |df| to_text(df, "email_address"))?;
    runner.step("reformat address", |df| reformat_address(df, "address"))?;
    runner.step("resolve country", |df| resolve_country_names(df, "country"))?;
    runner.step("fill country_code", |df| {
        fill_country_codes(df, "country", "country_code")
    })?;
    runner.step("format phone_number", |df| {
        format_phone_numbers(df, "phone_number", "country_code")
    })?;
    runner.step("drop incomplete rows", drop_rows_with_any_null)
}
