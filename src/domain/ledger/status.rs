//! Order status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase order.
///
/// `Settled` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting payment confirmation from the gateway.
    Pending,

    /// Payment confirmed; the grant side effect has been issued.
    Settled,

    /// Superseded by a newer order, or explicitly abandoned.
    Canceled,
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!((self, target), (Pending, Settled) | (Pending, Canceled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Settled, Canceled],
            Settled => vec![],
            Canceled => vec![],
        }
    }
}
