//! Entitlement grant entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::RoleTier;

/// One active time-limited role held by one user.
///
/// # Invariants
///
/// - `expires_at > granted_at` always
/// - At most one grant per user (enforced by the registry)
///
/// Lifecycle: created when an order settles; removed by the sweep; replaced
/// whole, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementGrant {
    /// Grant owner.
    pub user_id: UserId,

    /// The entitlement tier held.
    pub role: RoleTier,

    /// When the grant was issued.
    pub granted_at: Timestamp,

    /// When the grant lapses and becomes sweepable.
    pub expires_at: Timestamp,
}

impl EntitlementGrant {
    /// Creates a grant valid for `duration_days` from `granted_at`.
    pub fn new(user_id: UserId, role: RoleTier, granted_at: Timestamp, duration_days: u32) -> Self {
        Self {
            user_id,
            role,
            granted_at,
            // duration_days >= 1 by policy, so expires_at > granted_at holds
            expires_at: granted_at.add_days(duration_days.max(1) as i64),
        }
    }

    /// Returns true if the grant has lapsed as of `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_at_or_after(&self.expires_at)
    }
}
