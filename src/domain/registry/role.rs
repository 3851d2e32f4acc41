//! Entitlement tier definitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Membership role tier sold through the enrollment flow.
///
/// Persisted and exchanged by stable name; external directory handles are
/// resolved from the name by the directory adapter, never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleTier {
    /// For members who already trade and want the daily trading profile.
    /// Fixed 30-day duration regardless of purchase day.
    Warriors,

    /// The intensive from-scratch learning track. Duration counts down with
    /// the enrollment day so every cohort expires together.
    Fellows,
}

impl RoleTier {
    /// Returns the stable wire/persistence name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            RoleTier::Warriors => "WARRIORS",
            RoleTier::Fellows => "FELLOWS",
        }
    }

    /// Parses a tier from its stable name.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name {
            "WARRIORS" => Ok(RoleTier::Warriors),
            "FELLOWS" => Ok(RoleTier::Fellows),
            other => Err(ValidationError::invalid_format(
                "role_name",
                format!("unknown role tier '{}'", other),
            )),
        }
    }
}

impl std::fmt::Display for RoleTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
