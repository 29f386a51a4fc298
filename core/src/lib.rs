//! # VerifyGate Core
//!
//! Core business logic for the VerifyGate registration backend.
//! This crate contains the OTP policy engine, the registration orchestrator,
//! domain entities, repository interfaces and error types. Storage and
//! delivery are reached only through the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    validate_registration_input, IdentityStatus, OtpState, RegistrationInput, User, UserRole,
    VerificationInput, VerifyOutcome,
};
pub use errors::{DomainError, DomainResult, ErrorKind, OtpError, ValidationError};
pub use repositories::UserRepository;
pub use services::{
    ExpiringStore, NotificationSender, OtpKeys, OtpPolicyEngine, RegistrationService,
};
