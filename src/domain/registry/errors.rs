//! Registry-specific error types.

use thiserror::Error;

/// Errors raised by the duration policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The registration day index falls outside the configured schedule.
    ///
    /// Recovered by the caller: log a warning and fall back to the default
    /// duration rather than aborting the grant.
    #[error("Registration day {day_index} is outside the {schedule_len}-day duration schedule")]
    OutOfRange {
        day_index: i64,
        schedule_len: usize,
    },
}
