//! Audit log adapters.

mod jsonl_audit_log;

pub use jsonl_audit_log::JsonlAuditLog;
