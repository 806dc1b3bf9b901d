//! Ordered step execution for a single table.
//!
//! A [`StepRunner`] owns the table's frame while it is cleaned. Every step is
//! a closure over `&mut DataFrame` returning a [`TransformOutcome`]; the runner
//! records what happened and applies the [`ErrorPolicy`] when a step fails.

use mrdc_model::{CleanReport, ErrorPolicy, StepRecord, TableKind, TransformOutcome};
use mrdc_transform::TransformError;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::error::{CleanError, Result};

/// A cleaned frame and the report of how it got there.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub frame: DataFrame,
    pub report: CleanReport,
}

pub struct StepRunner {
    table: TableKind,
    policy: ErrorPolicy,
    frame: DataFrame,
    report: CleanReport,
}

impl StepRunner {
    pub fn new(table: TableKind, frame: DataFrame, policy: ErrorPolicy) -> Self {
        let report = CleanReport::new(table, frame.height());
        Self {
            table,
            policy,
            frame,
            report,
        }
    }

    /// Runs one named step.
    ///
    /// A failed step leaves the frame as it was. Under
    /// [`ErrorPolicy::Continue`] the failure is recorded and `Ok` is returned
    /// so the next step runs; under [`ErrorPolicy::Abort`] it is returned as
    /// [`CleanError::StepFailed`].
    pub fn step<F>(&mut self, name: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut DataFrame) -> std::result::Result<TransformOutcome, TransformError>,
    {
        match apply(&mut self.frame) {
            Ok(outcome) => {
                info!(
                    table = %self.table,
                    step = name,
                    changed = outcome.changed,
                    failed = outcome.failed,
                    dropped = outcome.dropped,
                    rows = self.frame.height(),
                    "step applied"
                );
                self.report.steps.push(StepRecord::applied(name, outcome));
                Ok(())
            }
            Err(error) => match self.policy {
                ErrorPolicy::Continue => {
                    warn!(table = %self.table, step = name, %error, "step failed, continuing");
                    self.report
                        .steps
                        .push(StepRecord::failed(name, error.to_string()));
                    Ok(())
                }
                ErrorPolicy::Abort => {
                    warn!(table = %self.table, step = name, %error, "step failed, aborting table");
                    Err(CleanError::StepFailed {
                        table: self.table,
                        step: name.to_string(),
                        source: error,
                    })
                }
            },
        }
    }

    /// Drops each column in its own step, so one missing column does not keep
    /// the others.
    pub fn drop_each(&mut self, columns: &[&str]) -> Result<()> {
        for column in columns {
            self.step(&format!("drop {column}"), |df| {
                mrdc_transform::drop_columns(df, &[*column])
            })?;
        }
        Ok(())
    }

    pub fn finish(self) -> CleanedTable {
        let mut report = self.report;
        report.rows_out = self.frame.height();
        CleanedTable {
            frame: self.frame,
            report,
        }
    }
}
