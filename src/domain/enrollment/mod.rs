//! Enrollment Window Scheduler: the rolling period gating new purchases.

mod window;

pub use window::{EnrollmentWindow, RolloverPolicy, WindowPhase};
