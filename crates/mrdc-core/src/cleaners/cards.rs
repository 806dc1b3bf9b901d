//! Card details (PDF to `dim_card_details`).

use mrdc_transform::{
    drop_rows_with_any_null, normalize_dates, reformat_month_year, strip_non_digits, to_int64,
    to_text, validate_card_numbers,
};

use crate::error::Result;
use crate::runner::StepRunner;

/// Columns produced when the PDF extractor merges or indexes cells.
const EXTRACTION_ARTIFACTS: [&str; 2] = ["card_number expiry_date", "Unnamed: 0"];

pub(super) fn clean_cards(runner: &mut StepRunner) -> Result<()> {
    runner.drop_each(&EXTRACTION_ARTIFACTS)?;
    runner.step("reformat expiry_date", |df| {
        reformat_month_year(df, "expiry_date")
    })?;
    runner.step("normalize date_payment_confirmed", |df| {
        normalize_dates(df, "date_payment_confirmed")
    })?;
    runner.step("strip card_number", |df| strip_non_digits(df, "card_number"))?;
    runner.step("text card_provider", |df| to_text(df, "card_provider"))?;
    runner.step("validate card_number", |df| {
        validate_card_numbers(df, "card_number", "card_provider")
    })?;
    runner.step("int card_number", |df| to_int64(df, "card_number"))?;
    runner.step("drop incomplete rows", drop_rows_with_any_null)
}
