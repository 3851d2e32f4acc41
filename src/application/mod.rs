//! Application layer: the state container and command handlers.

pub mod handlers;
pub mod state;
