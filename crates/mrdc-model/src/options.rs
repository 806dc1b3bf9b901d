//! Configuration options for table cleaning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// What a cleaner does when one of its steps fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the failed step and run the remaining steps.
    #[default]
    Continue,
    /// Stop cleaning the table at the first failed step.
    Abort,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Continue => f.write_str("continue"),
            ErrorPolicy::Abort => f.write_str("abort"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(ErrorPolicy::Continue),
            "abort" => Ok(ErrorPolicy::Abort),
            _ => Err(ModelError::UnknownErrorPolicy(s.to_string())),
        }
    }
}

/// Options for running a domain cleaner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningOptions {
    pub error_policy: ErrorPolicy,

    /// Currency symbol removed from product prices.
    pub currency_symbol: String,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Continue,
            currency_symbol: "£".to_string(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}
