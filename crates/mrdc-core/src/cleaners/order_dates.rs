//! Order date details (object storage JSON to `dim_date_times`).

use mrdc_transform::{
    combine_date_parts, drop_null_rows, drop_rows_with_value, normalize_dates, reformat_time,
    to_category, to_text,
};

use crate::error::Result;
use crate::runner::StepRunner;

/// Placeholder found in the timestamp column of junk rows.
pub const TIMESTAMP_SENTINEL: &str = "SAAZHF87TI";

const DATE_PARTS: [&str; 3] = ["year", "month", "day"];

pub(super) fn clean_order_dates(runner: &mut StepRunner) -> Result<()> {
    runner.step("combine date", |df| combine_date_parts(df, &DATE_PARTS, "date"))?;
    runner.drop_each(&["month", "year", "day"])?;
    runner.step("normalize date", |df| normalize_dates(df, "date"))?;
    runner.step("categorize time_period", |df| to_category(df, "time_period"))?;
    runner.step("text date_uuid", |df| to_text(df, "date_uuid"))?;
    runner.step("drop timestamp sentinel", |df| {
        drop_rows_with_value(df, "timestamp", TIMESTAMP_SENTINEL)
    })?;
    runner.step("drop rows without date", |df| drop_null_rows(df, "date"))?;
    runner.step("reformat timestamp", |df| reformat_time(df, "timestamp"))
}
