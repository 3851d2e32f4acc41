//! Snapshot persistence configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Persistence configuration (file snapshot store)
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Path of the snapshot file
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Minutes between periodic checkpoints
    #[serde(default = "default_checkpoint_interval_mins")]
    pub checkpoint_interval_mins: u64,

    /// Path of the append-only audit log
    #[serde(default = "default_audit_path")]
    pub audit_path: PathBuf,
}

impl PersistenceConfig {
    /// Validate persistence configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PERSISTENCE__SNAPSHOT_PATH",
            ));
        }
        if self.checkpoint_interval_mins == 0 {
            return Err(ValidationError::InvalidCheckpointInterval);
        }
        if self.audit_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("PERSISTENCE__AUDIT_PATH"));
        }
        Ok(())
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            checkpoint_interval_mins: default_checkpoint_interval_mins(),
            audit_path: default_audit_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("role_warden_state.json")
}

fn default_checkpoint_interval_mins() -> u64 {
    15
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("role_warden_audit.jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PersistenceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = PersistenceConfig {
            snapshot_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = PersistenceConfig {
            checkpoint_interval_mins: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCheckpointInterval)
        ));
    }
}
