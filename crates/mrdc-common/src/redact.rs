//! Row-level value redaction for log output.
//!
//! User and card tables carry personal data (names, phone numbers, card
//! numbers). Transforms only log sample values through [`redact_value`], which
//! hides them unless row-level logging was switched on at startup.

use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Enable or disable row-level logging for the whole process.
pub fn set_log_data(enable: bool) {
    LOG_DATA_ENABLED.store(enable, Ordering::Release);
}

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Acquire)
}

/// Returns the input value when row-level logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_by_default_and_passes_through_when_enabled() {
        set_log_data(false);
        assert_eq!(redact_value("+442079460958"), REDACTED_VALUE);
        set_log_data(true);
        assert_eq!(redact_value("+442079460958"), "+442079460958");
        set_log_data(false);
    }
}
