//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// Identifier of a purchasing user on the external platform.
///
/// Opaque string, validated non-empty. The external directory resolves it to
/// an actual member; the core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId, rejecting empty input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a purchase order.
///
/// Format: `order-{user_id}-{unix_secs}`. The embedded parts exist for
/// traceability only; the core resolves orders through the ledger, never by
/// parsing the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generates a new order id for a user at a point in time.
    pub fn generate(user_id: &UserId, created_at: Timestamp) -> Self {
        Self(format!("order-{}-{}", user_id, created_at.as_unix_secs()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with("order-") {
            return Err(ValidationError::invalid_format(
                "order_id",
                "missing order- prefix",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_accepts_platform_snowflake() {
        let id = UserId::new("123456789012345678").unwrap();
        assert_eq!(id.as_str(), "123456789012345678");
    }

    #[test]
    fn order_id_embeds_user_and_time() {
        let user = UserId::new("42").unwrap();
        let ts = Timestamp::from_unix_secs(1_700_000_000);
        let order = OrderId::generate(&user, ts);
        assert_eq!(order.as_str(), "order-42-1700000000");
    }

    #[test]
    fn order_id_parses_with_prefix() {
        let order: OrderId = "order-42-1700000000".parse().unwrap();
        assert_eq!(order.to_string(), "order-42-1700000000");
    }

    #[test]
    fn order_id_rejects_foreign_format() {
        assert!("invoice-42".parse::<OrderId>().is_err());
    }

    #[test]
    fn order_id_serializes_transparently() {
        let order: OrderId = "order-42-1".parse().unwrap();
        assert_eq!(serde_json::to_string(&order).unwrap(), "\"order-42-1\"");
    }
}
