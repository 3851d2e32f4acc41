//! Durable snapshot of the whole core state.

use serde::{Deserialize, Serialize};

use super::enrollment::EnrollmentWindow;
use super::ledger::OrderLedger;
use super::registry::EntitlementRegistry;

/// One consistent capture of the Ledger, Registry and Window.
///
/// Everything inside is keyed by stable identifiers (role names, user id
/// strings); live external handles are never persisted. Persistence is a
/// full-state overwrite: the last snapshot wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub ledger: OrderLedger,
    pub registry: EntitlementRegistry,
    pub window: EnrollmentWindow,
}
