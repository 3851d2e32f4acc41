//! The order ledger: every purchase attempt and its lifecycle status.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::registry::RoleTier;

use super::{LedgerError, Order, OrderStatus};

/// In-memory ledger of purchase orders.
///
/// Owned exclusively by the core state container; callers serialize access
/// through its lock. All operations here are plain map mutations with no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLedger {
    orders: HashMap<OrderId, Order>,
}

impl OrderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new pending order for a user.
    ///
    /// Cancels any existing pending order for the same user first, so that
    /// at most one order per user is pending after the call.
    pub fn create_order(&mut self, user_id: UserId, role: RoleTier, now: Timestamp) -> OrderId {
        for order in self.orders.values_mut() {
            if order.user_id == user_id && order.status == OrderStatus::Pending {
                order.status = OrderStatus::Canceled;
            }
        }

        // Ids embed whole seconds, so a repurchase within the same second
        // would collide with the record just canceled. Bump the creation
        // instant until the id is unused; this also keeps `created_at`
        // strictly increasing per user.
        let mut created_at = now;
        while self
            .orders
            .contains_key(&OrderId::generate(&user_id, created_at))
        {
            created_at = created_at.plus_secs(1);
        }

        let order = Order::new(user_id, role, created_at);
        let id = order.id.clone();
        self.orders.insert(id.clone(), order);
        id
    }

    /// Settles an order, returning the data needed to compute its grant.
    ///
    /// The terminal-state check doubles as a compare-and-set: of two
    /// concurrent settlements for the same order (serialized by the caller's
    /// lock), only the first succeeds; the second gets `AlreadyTerminal`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order id is unknown
    /// - `AlreadyTerminal` if the order is already settled or canceled
    pub fn settle(&mut self, id: &OrderId) -> Result<Order, LedgerError> {
        let order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        if order.is_terminal() {
            return Err(LedgerError::AlreadyTerminal {
                id: id.clone(),
                status: order.status,
            });
        }

        order.status = OrderStatus::Settled;
        Ok(order.clone())
    }

    /// Cancels a pending order. No-op if the order is already terminal.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order id is unknown
    pub fn cancel(&mut self, id: &OrderId) -> Result<(), LedgerError> {
        let order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        if !order.is_terminal() {
            order.status = OrderStatus::Canceled;
        }
        Ok(())
    }

    /// Returns the most recent non-canceled order for a user, if any.
    pub fn find_active_for_user(&self, user_id: &UserId) -> Option<&Order> {
        self.orders
            .values()
            .filter(|o| &o.user_id == user_id && o.status != OrderStatus::Canceled)
            .max_by_key(|o| o.created_at)
    }

    /// Returns all orders for a user, most recent first.
    pub fn orders_for_user(&self, user_id: &UserId) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self
            .orders
            .values()
            .filter(|o| &o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Looks up an order by id.
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Number of orders in the ledger.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the ledger holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
