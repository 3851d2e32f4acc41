//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ROLE_WARDEN_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use role_warden::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod directory;
mod enrollment;
mod error;
mod payment;
mod persistence;
mod server;

pub use directory::DirectoryConfig;
pub use enrollment::EnrollmentConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use persistence::PersistenceConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment gateway configuration (Midtrans Snap)
    pub payment: PaymentConfig,

    /// Enrollment window and duration policy configuration
    pub enrollment: EnrollmentConfig,

    /// Membership directory configuration (Discord REST)
    pub directory: DirectoryConfig,

    /// Snapshot persistence configuration
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ROLE_WARDEN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ROLE_WARDEN__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ROLE_WARDEN__PAYMENT__SERVER_KEY=...` -> `payment.server_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing or
    /// values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROLE_WARDEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.enrollment.validate()?;
        self.directory.validate()?;
        self.persistence.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("ROLE_WARDEN__PAYMENT__SERVER_KEY", "SB-Mid-server-test");
        env::set_var(
            "ROLE_WARDEN__ENROLLMENT__WINDOW_START",
            "2026-01-01T00:00:00Z",
        );
        env::set_var("ROLE_WARDEN__DIRECTORY__BOT_TOKEN", "bot-token");
        env::set_var("ROLE_WARDEN__DIRECTORY__GUILD_ID", "100");
        env::set_var("ROLE_WARDEN__DIRECTORY__WARRIORS_ROLE_ID", "200");
        env::set_var("ROLE_WARDEN__DIRECTORY__FELLOWS_ROLE_ID", "300");
        env::set_var("ROLE_WARDEN__DIRECTORY__BROADCAST_CHANNEL_ID", "400");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("ROLE_WARDEN__PAYMENT__SERVER_KEY");
        env::remove_var("ROLE_WARDEN__ENROLLMENT__WINDOW_START");
        env::remove_var("ROLE_WARDEN__DIRECTORY__BOT_TOKEN");
        env::remove_var("ROLE_WARDEN__DIRECTORY__GUILD_ID");
        env::remove_var("ROLE_WARDEN__DIRECTORY__WARRIORS_ROLE_ID");
        env::remove_var("ROLE_WARDEN__DIRECTORY__FELLOWS_ROLE_ID");
        env::remove_var("ROLE_WARDEN__DIRECTORY__BROADCAST_CHANNEL_ID");
        env::remove_var("ROLE_WARDEN__SERVER__PORT");
        env::remove_var("ROLE_WARDEN__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.server_key, "SB-Mid-server-test");
        assert_eq!(config.enrollment.window_start, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.payment.price, 150_000);
        assert_eq!(config.enrollment.enrollment_period_days, 7);
        assert_eq!(config.enrollment.class_duration_days, 37);
        assert_eq!(config.persistence.checkpoint_interval_mins, 15);
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ROLE_WARDEN__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
