//! Midtrans Snap adapter.
//!
//! Creates hosted checkout sessions through the Snap transactions API.
//! Snap authenticates with HTTP Basic auth: the server key is the username
//! and the password is empty.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PaymentConfig;
use crate::ports::{CheckoutRequest, CheckoutSession, PaymentGateway, PaymentGatewayError};

/// Midtrans Snap API configuration.
#[derive(Clone)]
pub struct SnapConfig {
    /// Midtrans server key.
    server_key: SecretString,

    /// Snap transactions endpoint.
    snap_url: String,
}

impl SnapConfig {
    /// Create a new Snap configuration.
    pub fn new(server_key: impl Into<String>, snap_url: impl Into<String>) -> Self {
        Self {
            server_key: SecretString::new(server_key.into()),
            snap_url: snap_url.into(),
        }
    }

    /// Create configuration from the payment config section.
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.server_key.clone(), config.snap_url.clone())
    }
}

/// Midtrans Snap payment gateway adapter.
pub struct SnapAdapter {
    config: SnapConfig,
    http_client: reqwest::Client,
}

impl SnapAdapter {
    /// Create a new Snap adapter with the given configuration.
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn payload(request: &CheckoutRequest) -> SnapPayload {
        SnapPayload {
            transaction_details: TransactionDetails {
                order_id: request.order_id.to_string(),
                gross_amount: request.amount,
            },
            item_details: vec![ItemDetails {
                id: request.role.name().to_string(),
                price: request.amount,
                quantity: 1,
                name: format!("{} MONTHLY", request.role.name()),
            }],
            customer_details: CustomerDetails {
                first_name: request.user_id.to_string(),
            },
        }
    }
}

#[async_trait]
impl PaymentGateway for SnapAdapter {
    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        let payload = Self::payload(&request);
        debug!(order_id = %request.order_id, amount = request.amount,
            "Creating Snap transaction");

        let response = self
            .http_client
            .post(&self.config.snap_url)
            .basic_auth(self.config.server_key.expose_secret(), Some(""))
            .json(&payload)
            .send()
            .await
            .map_err(|e| PaymentGatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(order_id = %request.order_id, %status, body,
                "Snap transaction rejected");
            return Err(PaymentGatewayError::RequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let snap: SnapResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::RequestFailed(e.to_string()))?;

        let redirect_url = snap
            .redirect_url
            .ok_or(PaymentGatewayError::MissingRedirectUrl)?;

        Ok(CheckoutSession { redirect_url })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct SnapPayload {
    transaction_details: TransactionDetails,
    item_details: Vec<ItemDetails>,
    customer_details: CustomerDetails,
}

#[derive(Debug, Serialize)]
struct TransactionDetails {
    order_id: String,
    gross_amount: u64,
}

#[derive(Debug, Serialize)]
struct ItemDetails {
    id: String,
    price: u64,
    quantity: u32,
    name: String,
}

#[derive(Debug, Serialize)]
struct CustomerDetails {
    first_name: String,
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    #[allow(dead_code)]
    token: Option<String>,
    redirect_url: Option<String>,
}
