//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Window start is not a valid RFC 3339 timestamp")]
    InvalidWindowStart,

    #[error("Enrollment period must be at least 1 day and fit inside the class duration")]
    InvalidEnrollmentPeriod,

    #[error("Role duration values must all be at least 1 day")]
    InvalidDurationSchedule,

    #[error("Tick interval must be at least 1 hour")]
    InvalidTickInterval,

    #[error("Checkpoint interval must be at least 1 minute")]
    InvalidCheckpointInterval,

    #[error("Price must be greater than zero")]
    InvalidPrice,
}
