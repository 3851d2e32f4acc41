//! Entitlement Registry: active grants and their expirations.
//!
//! Leaf component. The registry records the decision that a role is held;
//! applying it on the external platform is the orchestrator's job.

mod duration;
mod errors;
mod grant;
mod registry;
mod role;

pub use duration::DurationPolicy;
pub use errors::PolicyError;
pub use grant::EntitlementGrant;
pub use registry::EntitlementRegistry;
pub use role::RoleTier;
