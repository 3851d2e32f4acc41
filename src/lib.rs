//! Role Warden - Time-limited membership entitlement service
//!
//! Grants a user a membership role after an external payment gateway confirms
//! a purchase, and automatically revokes the role when its validity period
//! elapses. A rolling monthly enrollment window gates whether new purchases
//! are accepted; window rollover triggers a bulk expiry sweep.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
