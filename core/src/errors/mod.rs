//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{OtpError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    #[error("Notification delivery failed: {message}")]
    NotificationFailure { message: String },

    #[error("OTP store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Flat classification of every failure the registration flow can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    InvalidEmail,
    DuplicateIdentity,
    AccountLocked,
    SpamLocked,
    Cooldown,
    InvalidOrExpired,
    WrongCode,
    TooManyAttempts,
    NotificationFailure,
    StoreUnavailable,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::InvalidEmail => "INVALID_EMAIL",
            ErrorKind::DuplicateIdentity => "DUPLICATE_IDENTITY",
            ErrorKind::AccountLocked => "ACCOUNT_LOCKED",
            ErrorKind::SpamLocked => "SPAM_LOCKED",
            ErrorKind::Cooldown => "COOLDOWN",
            ErrorKind::InvalidOrExpired => "INVALID_OR_EXPIRED",
            ErrorKind::WrongCode => "WRONG_CODE",
            ErrorKind::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            ErrorKind::NotificationFailure => "NOTIFICATION_FAILURE",
            ErrorKind::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Otp(e) => match e {
                OtpError::DuplicateIdentity => ErrorKind::DuplicateIdentity,
                OtpError::AccountLocked => ErrorKind::AccountLocked,
                OtpError::SpamLocked => ErrorKind::SpamLocked,
                OtpError::Cooldown => ErrorKind::Cooldown,
                OtpError::InvalidOrExpired => ErrorKind::InvalidOrExpired,
                OtpError::WrongCode { .. } => ErrorKind::WrongCode,
                OtpError::TooManyAttempts => ErrorKind::TooManyAttempts,
            },
            DomainError::ValidationErr(e) => match e {
                ValidationError::MissingField { .. } => ErrorKind::MissingField,
                ValidationError::InvalidEmail => ErrorKind::InvalidEmail,
            },
            DomainError::NotificationFailure { .. } => ErrorKind::NotificationFailure,
            DomainError::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            DomainError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Infrastructure failures must not leak their detail to end users
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::NotificationFailure { .. }
                | DomainError::StoreUnavailable { .. }
                | DomainError::Internal { .. }
        )
    }

    /// Remaining verification attempts, present only for `WrongCode`
    pub fn attempts_remaining(&self) -> Option<u32> {
        match self {
            DomainError::Otp(OtpError::WrongCode { attempts_remaining }) => {
                Some(*attempts_remaining)
            }
            _ => None,
        }
    }

    pub(crate) fn store(message: impl std::fmt::Display) -> Self {
        DomainError::StoreUnavailable {
            message: message.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
