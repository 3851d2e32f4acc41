//! Enrollment cycle configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::enrollment::{EnrollmentWindow, RolloverPolicy};
use crate::domain::foundation::Timestamp;
use crate::domain::registry::DurationPolicy;

/// Enrollment window and duration policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentConfig {
    /// RFC 3339 timestamp at which the first window opens
    pub window_start: String,

    /// Days during which new orders are accepted
    #[serde(default = "default_enrollment_period_days")]
    pub enrollment_period_days: u32,

    /// Full cycle length in days
    #[serde(default = "default_class_duration_days")]
    pub class_duration_days: u32,

    /// How the next window start is chosen at rollover
    #[serde(default)]
    pub rollover_policy: RolloverPolicy,

    /// Hours between scheduler pulses
    #[serde(default = "default_tick_interval_hours")]
    pub tick_interval_hours: u64,

    /// Grant length for the Warriors tier
    #[serde(default = "default_warriors_duration_days")]
    pub warriors_duration_days: u32,

    /// Per-registration-day grant lengths for the Fellows tier
    #[serde(default = "default_fellows_schedule")]
    pub fellows_schedule: Vec<u32>,
}

impl EnrollmentConfig {
    /// Build the initial enrollment window from this configuration.
    pub fn window(&self) -> Result<EnrollmentWindow, ValidationError> {
        let start = Timestamp::parse_rfc3339(&self.window_start)
            .map_err(|_| ValidationError::InvalidWindowStart)?;
        EnrollmentWindow::new(start, self.enrollment_period_days, self.class_duration_days)
            .map_err(|_| ValidationError::InvalidEnrollmentPeriod)
    }

    /// Build the duration policy from this configuration.
    pub fn duration_policy(&self) -> DurationPolicy {
        DurationPolicy {
            fixed_days: self.warriors_duration_days,
            fellows_schedule: self.fellows_schedule.clone(),
        }
    }

    /// Validate enrollment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_start.is_empty() {
            return Err(ValidationError::MissingRequired("ENROLLMENT__WINDOW_START"));
        }
        self.window()?;
        if self.tick_interval_hours == 0 {
            return Err(ValidationError::InvalidTickInterval);
        }
        if self.warriors_duration_days == 0
            || self.fellows_schedule.is_empty()
            || self.fellows_schedule.iter().any(|d| *d == 0)
        {
            return Err(ValidationError::InvalidDurationSchedule);
        }
        Ok(())
    }
}

fn default_enrollment_period_days() -> u32 {
    7
}

fn default_class_duration_days() -> u32 {
    37
}

fn default_tick_interval_hours() -> u64 {
    24
}

fn default_warriors_duration_days() -> u32 {
    30
}

fn default_fellows_schedule() -> Vec<u32> {
    vec![30, 29, 28, 27, 26, 25, 24]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> EnrollmentConfig {
        EnrollmentConfig {
            window_start: "2026-01-01T00:00:00Z".to_string(),
            enrollment_period_days: default_enrollment_period_days(),
            class_duration_days: default_class_duration_days(),
            rollover_policy: RolloverPolicy::default(),
            tick_interval_hours: default_tick_interval_hours(),
            warriors_duration_days: default_warriors_duration_days(),
            fellows_schedule: default_fellows_schedule(),
        }
    }

    #[test]
    fn test_valid_config_builds_window_and_policy() {
        let config = base();
        assert!(config.validate().is_ok());
        let window = config.window().unwrap();
        assert_eq!(window.enrollment_end(), window.window_start().add_days(7));
        assert_eq!(window.window_end(), window.window_start().add_days(37));
    }

    #[test]
    fn test_garbled_window_start_rejected() {
        let config = EnrollmentConfig {
            window_start: "next tuesday".to_string(),
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWindowStart)
        ));
    }

    #[test]
    fn test_period_longer_than_cycle_rejected() {
        let config = EnrollmentConfig {
            enrollment_period_days: 40,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidEnrollmentPeriod)
        ));
    }

    #[test]
    fn test_zero_duration_in_schedule_rejected() {
        let config = EnrollmentConfig {
            fellows_schedule: vec![30, 0, 28],
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDurationSchedule)
        ));
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let config = EnrollmentConfig {
            tick_interval_hours: 0,
            ..base()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTickInterval)
        ));
    }
}
