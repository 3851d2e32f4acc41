//! Audit log port.
//!
//! Append-only record of settled transactions, one row per settlement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::ledger::OrderStatus;
use crate::domain::registry::RoleTier;

/// One audit row for a settled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub role: RoleTier,
    pub status: OrderStatus,
    pub timestamp: Timestamp,
}

/// Errors from the audit sink.
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Audit append failed: {0}")]
    AppendFailed(String),
}

/// Port for the append-only transaction record.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends one settled-transaction row.
    ///
    /// # Errors
    ///
    /// Returns `AuditError` on sink failure; the caller logs and continues.
    async fn append(&self, record: AuditRecord) -> Result<(), AuditError>;
}
