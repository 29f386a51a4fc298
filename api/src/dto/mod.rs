pub mod auth;

pub use auth::{OtpField, RegistrationRequest, VerificationRequest};
