//! Ledger-specific error types.

use thiserror::Error;

use crate::domain::foundation::OrderId;

use super::OrderStatus;

/// Errors raised by ledger operations.
///
/// Nothing here is fatal: `NotFound` surfaces as an empty result to callers
/// and `AlreadyTerminal` is the idempotent no-op path that webhook retries
/// land on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No order with this id exists in the ledger.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order already reached a terminal status.
    #[error("Order {id} is already {status:?}")]
    AlreadyTerminal { id: OrderId, status: OrderStatus },
}
