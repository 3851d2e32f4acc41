//! HTTP adapter: the Axum surface of the service.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::app_router;
