//! Command handlers orchestrating the core state and collaborator ports.

mod checkpoint;
mod confirm_payment;
mod query_status;
mod run_tick;
mod start_purchase;

pub use checkpoint::{restore_or_empty, CheckpointHandler};
pub use confirm_payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, CONFIRMING_STATUSES,
};
pub use query_status::{OrderStatusView, QueryStatusHandler};
pub use run_tick::{RunTickHandler, TickOutcome};
pub use start_purchase::{
    PurchaseError, StartPurchaseCommand, StartPurchaseHandler, StartPurchaseResult,
};
