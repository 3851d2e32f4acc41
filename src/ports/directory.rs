//! Membership directory port.
//!
//! Applies or removes an entitlement on the external platform. Failures here
//! are logged and surfaced but never roll back the core's own bookkeeping:
//! the ledger and registry reflect the decision that was made, not the
//! confirmed external effect. Retries are out of scope.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::registry::RoleTier;

/// Errors from the external directory.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The member or role could not be resolved on the platform.
    #[error("Member or role not found on the directory: user {user_id}, role {role}")]
    MemberOrRoleNotFound { user_id: UserId, role: RoleTier },

    /// The directory API call failed (permissions, rate limit, transport).
    #[error("Directory action failed: {0}")]
    ActionFailed(String),
}

/// Port for role membership actions on the external platform.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Adds the role to the user.
    async fn grant_role(&self, user_id: &UserId, role: RoleTier) -> Result<(), DirectoryError>;

    /// Removes the role from the user.
    async fn revoke_role(&self, user_id: &UserId, role: RoleTier) -> Result<(), DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn Directory) {}
    }
}
