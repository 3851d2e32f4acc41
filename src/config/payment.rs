//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Midtrans Snap)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Midtrans server key, used as the Basic auth username
    pub server_key: String,

    /// Snap transactions endpoint
    #[serde(default = "default_snap_url")]
    pub snap_url: String,

    /// Gross amount charged per membership, in the gateway's smallest unit
    #[serde(default = "default_price")]
    pub price: u64,
}

impl PaymentConfig {
    /// Check if pointing at the Midtrans sandbox
    pub fn is_sandbox(&self) -> bool {
        self.snap_url.contains("sandbox")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__SERVER_KEY"));
        }
        if self.snap_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__SNAP_URL"));
        }
        if self.price == 0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

fn default_snap_url() -> String {
    "https://app.sandbox.midtrans.com/snap/v1/transactions".to_string()
}

fn default_price() -> u64 {
    150_000
}
