//! Error types for table cleaning.

use mrdc_model::TableKind;
use mrdc_transform::TransformError;
use thiserror::Error;

/// Errors returned by a cleaner running under [`ErrorPolicy::Abort`].
///
/// [`ErrorPolicy::Abort`]: mrdc_model::ErrorPolicy::Abort
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("{table}: step '{step}' failed: {source}")]
    StepFailed {
        table: TableKind,
        step: String,
        #[source]
        source: TransformError,
    },
}

impl CleanError {
    /// Name of the step that failed.
    pub fn step(&self) -> &str {
        match self {
            CleanError::StepFailed { step, .. } => step,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
