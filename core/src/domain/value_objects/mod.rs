//! Value objects representing immutable domain concepts.

pub mod identity_status;
pub mod otp_state;

// Re-export commonly used types
pub use identity_status::IdentityStatus;
pub use otp_state::{OtpState, VerifyOutcome, MAX_FAILED_ATTEMPTS};
