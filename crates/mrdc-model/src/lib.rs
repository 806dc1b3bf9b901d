//! Shared data model for the retail data centre pipeline.
//!
//! Table kinds with their sources and destinations, card providers, cleaning
//! options, step reports and connection credentials.

pub mod card;
pub mod credentials;
pub mod error;
pub mod options;
pub mod report;
pub mod table;

pub use card::CardProvider;
pub use credentials::{ConnectionParams, SourceCredentials, WarehouseCredentials};
pub use error::{ModelError, Result};
pub use options::{CleaningOptions, ErrorPolicy};
pub use report::{CleanReport, StepRecord, StepStatus, TransformOutcome};
pub use table::{TableKind, TableSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_aggregates_failures_per_column() {
        let mut report = CleanReport::new(TableKind::Users, 10);
        report.steps.push(StepRecord::applied(
            "normalize date_of_birth",
            TransformOutcome::for_column("date_of_birth").with_failed(2),
        ));
        report.steps.push(StepRecord::applied(
            "format phone_number",
            TransformOutcome::for_column("phone_number").with_failed(1),
        ));
        report.steps.push(StepRecord::applied(
            "normalize date_of_birth again",
            TransformOutcome::for_column("date_of_birth").with_failed(3),
        ));
        report.steps.push(StepRecord::failed("drop lat", "column 'lat' not found"));
        report.rows_out = 7;

        let failures = report.failures_by_column();
        assert_eq!(failures.get("date_of_birth"), Some(&5));
        assert_eq!(failures.get("phone_number"), Some(&1));
        assert_eq!(report.total_failures(), 6);
        assert_eq!(report.failed_step_count(), 1);
        assert!(report.has_failed_steps());
        assert_eq!(report.rows_dropped(), 3);
    }

    #[test]
    fn report_serializes() {
        let mut report = CleanReport::new(TableKind::Cards, 2);
        report.steps.push(StepRecord::applied(
            "validate card_number",
            TransformOutcome::rows_dropped(1),
        ));
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: CleanReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
