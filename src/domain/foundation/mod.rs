//! Shared domain building blocks.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{OrderId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
