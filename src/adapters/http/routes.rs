//! Axum router configuration.
//!
//! Defines the route structure and wires routes to their handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_status, handle_payment_notification, health, start_purchase, AppState,
};

/// Create the user-facing API router.
///
/// # Routes
///
/// - `POST /purchase` - Start a membership purchase
/// - `GET /status/:user_id` - List a user's orders
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/purchase", post(start_purchase))
        .route("/status/:user_id", get(get_status))
}

/// Create the webhook router.
///
/// Separate from the API routes because the gateway calls these without
/// user credentials.
///
/// # Routes
/// - `POST /payment` - Handle payment gateway notifications
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/payment", post(handle_payment_notification))
}

/// Create the complete application router.
///
/// Mounts the API at `/api`, webhooks at `/api/webhooks`, and the health
/// probe at the root.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .nest("/api/webhooks", webhook_routes())
}
