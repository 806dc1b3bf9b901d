//! Orders (`orders_table` to `orders_table`).

use crate::error::Result;
use crate::runner::StepRunner;

/// Personal details and leftover index columns.
const DROPPED: [&str; 4] = ["first_name", "last_name", "1", "level_0"];

pub(super) fn clean_orders(runner: &mut StepRunner) -> Result<()> {
    runner.drop_each(&DROPPED)
}
