//! QueryStatusHandler - user-facing payment status lookup.

use std::sync::Arc;

use crate::application::state::CoreState;
use crate::domain::foundation::{OrderId, UserId};
use crate::domain::ledger::OrderStatus;

/// One order as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusView {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Handler for status queries. Read-only; takes the shared lock.
pub struct QueryStatusHandler {
    state: Arc<CoreState>,
}

impl QueryStatusHandler {
    pub fn new(state: Arc<CoreState>) -> Self {
        Self { state }
    }

    /// Returns the user's orders, most recent first. Empty if none exist.
    pub fn handle(&self, user_id: &UserId) -> Vec<OrderStatusView> {
        self.state
            .query_status(user_id)
            .into_iter()
            .map(|(order_id, status)| OrderStatusView { order_id, status })
            .collect()
    }
}
