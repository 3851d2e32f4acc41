//! Midtrans payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Midtrans Snap API.
//! Secrets are handled via `secrecy::SecretString`.

mod snap_adapter;

pub use snap_adapter::{SnapAdapter, SnapConfig};
