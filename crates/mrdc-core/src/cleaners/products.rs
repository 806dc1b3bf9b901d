//! Products (object storage CSV to `dim_products`).

use mrdc_model::CleaningOptions;
use mrdc_transform::{
    extract_weight_units, normalize_dates, normalize_weights, strip_currency, title_case,
    to_category, to_float64, to_int64, to_text,
};

use crate::error::Result;
use crate::runner::StepRunner;

const UNIT_COLUMN: &str = "unit";

pub(super) fn clean_products(runner: &mut StepRunner, options: &CleaningOptions) -> Result<()> {
    runner.step("extract weight units", |df| {
        extract_weight_units(df, "weight", UNIT_COLUMN)
    })?;
    runner.step("convert weight to kg", |df| {
        normalize_weights(df, "weight", UNIT_COLUMN)
    })?;
    runner.drop_each(&[UNIT_COLUMN, "Unnamed: 0"])?;
    runner.step("title case product_name", |df| {
        title_case(df, "product_name")
    })?;
    runner.step("strip currency from product_price", |df| {
        strip_currency(df, "product_price", &options.currency_symbol)
    })?;
    runner.step("float product_price", |df| to_float64(df, "product_price"))?;
    runner.step("categorize category", |df| to_category(df, "category"))?;
    runner.step("int EAN", |df| to_int64(df, "EAN"))?;
    runner.step("normalize date_added", |df| normalize_dates(df, "date_added"))?;
    runner.step("text uuid", |df| to_text(df, "uuid"))?;
    runner.step("categorize removed", |df| to_category(df, "removed"))?;
    runner.step("text product_code", |df| to_text(df, "product_code"))
}
