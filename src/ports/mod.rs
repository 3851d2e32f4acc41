//! Ports: contracts the core expects its collaborators to fulfill.
//!
//! The core decides *that* a role should be granted or revoked and *when*;
//! these traits are how the decision leaves the process. Implementations
//! live under `adapters/`.

mod audit_log;
mod directory;
mod notifier;
mod payment_gateway;
mod snapshot_store;

pub use audit_log::{AuditError, AuditLog, AuditRecord};
pub use directory::{Directory, DirectoryError};
pub use notifier::{Notifier, NotifyError};
pub use payment_gateway::{CheckoutRequest, CheckoutSession, PaymentGateway, PaymentGatewayError};
pub use snapshot_store::{SnapshotStore, SnapshotStoreError};
