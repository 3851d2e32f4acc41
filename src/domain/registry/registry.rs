//! The entitlement registry: active grants keyed by user.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{EntitlementGrant, RoleTier};

/// In-memory registry of active grants.
///
/// At most one grant per user. Owned exclusively by the core state container;
/// callers serialize access through its lock, which is what makes `sweep` a
/// single atomic pass over a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRegistry {
    grants: HashMap<UserId, EntitlementGrant>,
}

impl EntitlementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a grant valid for `duration_days` from `now`.
    ///
    /// Replaces any existing grant for the user unconditionally
    /// (last-writer-wins; duration is recomputed, not accumulated). The
    /// replaced grant is returned so the orchestrator can revoke the old
    /// role externally if it differs.
    pub fn grant(
        &mut self,
        user_id: UserId,
        role: RoleTier,
        duration_days: u32,
        now: Timestamp,
    ) -> (EntitlementGrant, Option<EntitlementGrant>) {
        let grant = EntitlementGrant::new(user_id.clone(), role, now, duration_days);
        let previous = self.grants.insert(user_id, grant.clone());
        (grant, previous)
    }

    /// Removes and returns every grant with `expires_at <= now`.
    ///
    /// Entries not yet expired are left untouched. Calling twice with the
    /// same `now` and no intervening `grant` returns empty the second time.
    pub fn sweep(&mut self, now: Timestamp) -> Vec<EntitlementGrant> {
        let expired: Vec<UserId> = self
            .grants
            .values()
            .filter(|g| g.is_expired(now))
            .map(|g| g.user_id.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|user_id| self.grants.remove(&user_id))
            .collect()
    }

    /// Looks up the active grant for a user.
    pub fn grant_for(&self, user_id: &UserId) -> Option<&EntitlementGrant> {
        self.grants.get(user_id)
    }

    /// Number of active grants.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Returns true if no grants are held.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Iterates over all active grants.
    pub fn iter(&self) -> impl Iterator<Item = &EntitlementGrant> {
        self.grants.values()
    }
}
