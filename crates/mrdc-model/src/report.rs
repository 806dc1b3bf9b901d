//! Step outcomes and per-table cleaning reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::TableKind;

/// What a single transform did to the frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutcome {
    /// Column the transform rewrote, if it targets one.
    pub column: Option<String>,
    /// Cells whose value changed.
    pub changed: usize,
    /// Values that could not be parsed (nulled, set to a sentinel or kept raw).
    pub failed: usize,
    /// Rows removed from the frame.
    pub dropped: usize,
    /// Distinct levels of a categorized column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,
}

impl TransformOutcome {
    pub fn for_column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::default()
        }
    }

    pub fn rows_dropped(dropped: usize) -> Self {
        Self {
            dropped,
            ..Self::default()
        }
    }

    pub fn with_changed(mut self, changed: usize) -> Self {
        self.changed = changed;
        self
    }

    pub fn with_failed(mut self, failed: usize) -> Self {
        self.failed = failed;
        self
    }

    pub fn with_dropped(mut self, dropped: usize) -> Self {
        self.dropped = dropped;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Applied(TransformOutcome),
    Failed { reason: String },
}

/// One named step of a cleaner and how it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub status: StepStatus,
}

impl StepRecord {
    pub fn applied(step: impl Into<String>, outcome: TransformOutcome) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Applied(outcome),
        }
    }

    pub fn failed(step: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn outcome(&self) -> Option<&TransformOutcome> {
        match &self.status {
            StepStatus::Applied(outcome) => Some(outcome),
            StepStatus::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, StepStatus::Failed { .. })
    }
}

/// Report of one cleaner run over one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub table: TableKind,
    pub rows_in: usize,
    pub rows_out: usize,
    pub steps: Vec<StepRecord>,
}

impl CleanReport {
    pub fn new(table: TableKind, rows_in: usize) -> Self {
        Self {
            table,
            rows_in,
            rows_out: rows_in,
            steps: Vec::new(),
        }
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|step| step.is_failed())
    }

    pub fn failed_step_count(&self) -> usize {
        self.failed_steps().count()
    }

    pub fn has_failed_steps(&self) -> bool {
        self.steps.iter().any(StepRecord::is_failed)
    }

    /// Unparsable values per column, summed over every applied step.
    pub fn failures_by_column(&self) -> BTreeMap<String, usize> {
        let mut totals = BTreeMap::new();
        for outcome in self.steps.iter().filter_map(StepRecord::outcome) {
            if outcome.failed == 0 {
                continue;
            }
            if let Some(column) = &outcome.column {
                *totals.entry(column.clone()).or_insert(0) += outcome.failed;
            }
        }
        totals
    }

    pub fn total_failures(&self) -> usize {
        self.failures_by_column().values().sum()
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}
