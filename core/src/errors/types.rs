//! Domain-specific error types for the registration OTP flow
//!
//! Every message in this module is user-actionable and safe to return to the
//! client verbatim. Infrastructure failures live on `DomainError` directly.

use thiserror::Error;

/// Errors produced by the OTP policy engine and the duplicate-identity check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("User already exists with this email!")]
    DuplicateIdentity,

    #[error("Account locked due to multiple failed attempts! Try again after 30 minutes")]
    AccountLocked,

    #[error("Too many OTP requests! Please wait 1 hour before requesting again")]
    SpamLocked,

    #[error("Please wait 1 minute before requesting a new OTP!")]
    Cooldown,

    #[error("Invalid or expired OTP!")]
    InvalidOrExpired,

    #[error("Incorrect OTP. {attempts_remaining} attempts left.")]
    WrongCode { attempts_remaining: u32 },

    #[error("Too many failed attempts. Your account is locked for 30 minutes")]
    TooManyAttempts,
}

/// Registration input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields!")]
    MissingField { fields: Vec<String> },

    #[error("Invalid email format!")]
    InvalidEmail,
}
