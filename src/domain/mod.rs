//! Domain layer: the temporal entitlement state machine.
//!
//! Bounded contexts:
//! - `ledger` - purchase orders and their lifecycle
//! - `registry` - active grants and expiry sweeps
//! - `enrollment` - the rolling enrollment window scheduler
//! - `foundation` - shared value objects and traits

pub mod enrollment;
pub mod foundation;
pub mod ledger;
pub mod registry;

mod snapshot;

pub use snapshot::StateSnapshot;
