//! StartPurchaseHandler - opens a pending order and a checkout session.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::state::CoreState;
use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::registry::RoleTier;
use crate::ports::{CheckoutRequest, PaymentGateway, PaymentGatewayError};

/// Command to start a purchase once the intake flow has the user's details.
#[derive(Debug, Clone)]
pub struct StartPurchaseCommand {
    pub user_id: UserId,
    pub role: RoleTier,
}

/// A started purchase awaiting payment.
#[derive(Debug, Clone)]
pub struct StartPurchaseResult {
    pub order_id: OrderId,
    /// Hosted payment page for the user.
    pub redirect_url: String,
}

/// Errors surfaced to the intake collaborator.
#[derive(Debug, Clone, Error)]
pub enum PurchaseError {
    /// Enrollment is closed; carries when it next opens.
    #[error("Enrollment is closed until {}", next_open.format_date())]
    EnrollmentClosed { next_open: Timestamp },

    /// The checkout session could not be created. The pending order has
    /// already been canceled again; the user can simply retry.
    #[error("Checkout session could not be created: {0}")]
    CheckoutFailed(#[from] PaymentGatewayError),
}

/// Handler for the purchase-intent trigger.
///
/// Gates on the enrollment window, records the pending order, then asks the
/// payment gateway for a checkout URL. The gateway call happens outside the
/// state lock; if it fails the order is canceled so the user is not left
/// with a dangling pending entry.
pub struct StartPurchaseHandler {
    state: Arc<CoreState>,
    gateway: Arc<dyn PaymentGateway>,
    /// Gross amount charged per role, in the gateway's smallest unit.
    price: u64,
}

impl StartPurchaseHandler {
    pub fn new(state: Arc<CoreState>, gateway: Arc<dyn PaymentGateway>, price: u64) -> Self {
        Self {
            state,
            gateway,
            price,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartPurchaseCommand,
    ) -> Result<StartPurchaseResult, PurchaseError> {
        let now = Timestamp::now();

        if !self.state.is_accepting_orders(now) {
            return Err(PurchaseError::EnrollmentClosed {
                next_open: self.state.next_open(now),
            });
        }

        let order_id = self.state.create_order(cmd.user_id.clone(), cmd.role, now);
        info!(%order_id, user_id = %cmd.user_id, role = %cmd.role, "Created pending order");

        let session = match self
            .gateway
            .create_checkout(CheckoutRequest {
                order_id: order_id.clone(),
                user_id: cmd.user_id,
                role: cmd.role,
                amount: self.price,
            })
            .await
        {
            Ok(session) => session,
            Err(err) => {
                warn!(%order_id, error = %err, "Checkout creation failed, canceling order");
                // Best effort: the order exists, so NotFound cannot occur here
                let _ = self.state.cancel_order(&order_id);
                return Err(err.into());
            }
        };

        Ok(StartPurchaseResult {
            order_id,
            redirect_url: session.redirect_url,
        })
    }
}
