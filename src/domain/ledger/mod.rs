//! Order Ledger: purchase attempts and their lifecycle.
//!
//! Leaf component. Side effects are confined to the ledger's own map; the
//! orchestrating handlers call collaborators, never the ledger itself.

mod errors;
mod ledger;
mod order;
mod status;

pub use errors::LedgerError;
pub use ledger::OrderLedger;
pub use order::Order;
pub use status::OrderStatus;
