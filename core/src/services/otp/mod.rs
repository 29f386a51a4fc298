//! OTP policy engine for registration verification
//!
//! This module gates account registration behind a one-time passcode:
//! - Restriction checks (account lock, spam lock, cooldown)
//! - Sliding-window request tracking with escalation to a spam lock
//! - Code issuance through an injected notification sender
//! - Attempt-limited verification with escalation to an account lock
//!
//! All state lives in an injected expiring key-value store and expires
//! through its TTLs.

mod code;
pub mod policy;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use code::generate_otp;
pub use policy::OtpKeys;
pub use service::OtpPolicyEngine;
pub use traits::{ExpiringStore, NotificationSender};
