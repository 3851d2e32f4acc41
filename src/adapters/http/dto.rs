//! HTTP DTOs (Data Transfer Objects).
//!
//! These types define the JSON request/response structure for the API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ConfirmPaymentResult, OrderStatusView};
use crate::domain::ledger::OrderStatus;
use crate::domain::registry::RoleTier;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a membership purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    /// Platform id of the buying user.
    pub user_id: String,
    /// The tier being purchased.
    pub role: RoleTier,
}

/// Payment gateway webhook notification.
///
/// Only the fields the service acts on; everything else in the gateway's
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    pub order_id: String,
    pub transaction_status: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a started purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResponse {
    pub order_id: String,
    /// Hosted payment page to send the user to.
    pub redirect_url: String,
}

/// Response for a processed webhook notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub result: NotificationOutcome,
}

/// Webhook processing outcome as reported to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationOutcome {
    Settled,
    AlreadySettled,
    Ignored,
}

impl From<&ConfirmPaymentResult> for NotificationOutcome {
    fn from(result: &ConfirmPaymentResult) -> Self {
        match result {
            ConfirmPaymentResult::Settled { .. } => Self::Settled,
            ConfirmPaymentResult::AlreadySettled => Self::AlreadySettled,
            ConfirmPaymentResult::Ignored => Self::Ignored,
        }
    }
}

/// Response listing a user's orders.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub orders: Vec<OrderView>,
}

/// One order as shown in the status listing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order_id: String,
    pub status: OrderStatus,
}

impl From<OrderStatusView> for OrderView {
    fn from(view: OrderStatusView) -> Self {
        Self {
            order_id: view.order_id.to_string(),
            status: view.status,
        }
    }
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
