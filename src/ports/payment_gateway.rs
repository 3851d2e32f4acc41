//! Payment gateway port.
//!
//! The gateway creates a hosted checkout session for an order and later
//! confirms payment via webhook. Only session creation goes through this
//! port; webhook payloads arrive through the HTTP adapter. Signature
//! verification of those payloads is out of scope.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{OrderId, UserId};
use crate::domain::registry::RoleTier;

/// Request to open a checkout session for a pending order.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub role: RoleTier,
    /// Gross amount in the gateway's smallest currency unit.
    pub amount: u64,
}

/// A created checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Hosted payment page the user is sent to.
    pub redirect_url: String,
}

/// Errors from the payment gateway.
#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    /// The gateway API call failed (transport or non-2xx response).
    #[error("Payment gateway request failed: {0}")]
    RequestFailed(String),

    /// The gateway answered without a usable redirect URL.
    #[error("Payment gateway response had no redirect URL")]
    MissingRedirectUrl,
}

/// Port for creating checkout sessions.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout session, returning the hosted payment URL.
    ///
    /// # Errors
    ///
    /// Returns `PaymentGatewayError` on transport failure or an unusable
    /// response. The caller cancels the order and surfaces the failure.
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentGatewayError>;
}
