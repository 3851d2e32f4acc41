//! Adapters: concrete implementations of the ports.
//!
//! Each submodule binds one external concern to its port contract:
//!
//! - `http` - Axum routes and handlers (the inbound surface)
//! - `midtrans` - `PaymentGateway` against the Snap API
//! - `discord` - `Directory` and `Notifier` against the Discord REST API
//! - `audit` - append-only JSONL `AuditLog`
//! - `storage` - file-backed `SnapshotStore`

pub mod audit;
pub mod discord;
pub mod http;
pub mod midtrans;
pub mod storage;
