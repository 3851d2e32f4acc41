//! Order entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::registry::RoleTier;

use super::OrderStatus;

/// One purchase attempt.
///
/// # Invariants
///
/// - `id` is globally unique and immutable once assigned
/// - At most one order per user is `Pending` at any time (enforced by the
///   ledger, not this entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, embeds the owning user and creation instant.
    pub id: OrderId,

    /// User who initiated the purchase.
    pub user_id: UserId,

    /// Entitlement tier requested.
    pub role: RoleTier,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// When the order was created.
    pub created_at: Timestamp,
}

impl Order {
    /// Creates a new pending order, generating its id from the user and time.
    pub fn new(user_id: UserId, role: RoleTier, created_at: Timestamp) -> Self {
        Self {
            id: OrderId::generate(&user_id, created_at),
            user_id,
            role,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// Returns true if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        use crate::domain::foundation::StateMachine;
        self.status.is_terminal()
    }
}
