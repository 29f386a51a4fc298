//! Business services containing domain logic and use cases.

pub mod otp;
pub mod registration;

// Re-export commonly used types
pub use otp::{ExpiringStore, NotificationSender, OtpKeys, OtpPolicyEngine};
pub use registration::RegistrationService;
