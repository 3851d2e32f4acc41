//! HTTP handlers.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, PurchaseError, QueryStatusHandler,
    StartPurchaseCommand, StartPurchaseHandler,
};
use crate::domain::foundation::{OrderId, UserId};

use super::dto::{
    ErrorResponse, NotificationOutcome, NotificationResponse, OrderView, PaymentNotification,
    PurchaseRequest, PurchaseResponse, StatusResponse,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; the handlers inside are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub start_purchase: Arc<StartPurchaseHandler>,
    pub confirm_payment: Arc<ConfirmPaymentHandler>,
    pub query_status: Arc<QueryStatusHandler>,
}

/// POST /api/purchase - Start a membership purchase
pub async fn start_purchase(
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(request.user_id).map_err(|e| ApiError::validation(e.to_string()))?;

    let result = state
        .start_purchase
        .handle(StartPurchaseCommand {
            user_id,
            role: request.role,
        })
        .await?;

    let response = PurchaseResponse {
        order_id: result.order_id.to_string(),
        redirect_url: result.redirect_url,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/webhooks/payment - Handle payment gateway notifications
///
/// Always answers 200 once the payload parses, so the gateway does not
/// retry notifications the service has deliberately ignored.
pub async fn handle_payment_notification(
    State(state): State<AppState>,
    Json(notification): Json<PaymentNotification>,
) -> impl IntoResponse {
    let Ok(order_id) = notification.order_id.parse::<OrderId>() else {
        return Json(NotificationResponse {
            result: NotificationOutcome::Ignored,
        });
    };

    let result = state
        .confirm_payment
        .handle(ConfirmPaymentCommand {
            order_id,
            transaction_status: notification.transaction_status,
        })
        .await;

    Json(NotificationResponse {
        result: NotificationOutcome::from(&result),
    })
}

/// GET /api/status/:user_id - List a user's orders, most recent first
pub async fn get_status(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(user_id).map_err(|e| ApiError::validation(e.to_string()))?;

    let orders = state
        .query_status
        .handle(&user_id)
        .into_iter()
        .map(OrderView::from)
        .collect();

    Ok(Json(StatusResponse { orders }))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
pub enum ApiError {
    Validation(String),
    Purchase(PurchaseError),
}

impl ApiError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<PurchaseError> for ApiError {
    fn from(err: PurchaseError) -> Self {
        Self::Purchase(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            ApiError::Purchase(err @ PurchaseError::EnrollmentClosed { .. }) => {
                (StatusCode::FORBIDDEN, "ENROLLMENT_CLOSED", err.to_string())
            }
            ApiError::Purchase(err @ PurchaseError::CheckoutFailed(_)) => {
                (StatusCode::BAD_GATEWAY, "CHECKOUT_FAILED", err.to_string())
            }
        };

        let body = ErrorResponse::new(error_code, message);
        (status, Json(body)).into_response()
    }
}
