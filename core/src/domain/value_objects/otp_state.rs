//! Verification state machine for a single identity.
//!
//! The store holds the active code and the failed attempt counter; this
//! module decides what a submission does to them. Applying the decision to
//! the store is the policy engine's job.

use constant_time_eq::constant_time_eq;

use crate::errors::OtpError;

/// Wrong submissions tolerated before the account lock kicks in
pub const MAX_FAILED_ATTEMPTS: u32 = 2;

/// Verification sub-state reconstructed from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpState {
    /// No code issued, or it expired
    NoActiveOtp,
    /// A code is live with `attempts` wrong submissions recorded against it
    Active { code: String, attempts: u32 },
}

/// Effect of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Nothing to compare against
    NoActiveOtp,
    /// Code matched: clear the code and the attempt counter
    Verified,
    /// Code mismatched: persist `attempts` and report what is left
    WrongCode { attempts: u32, attempts_remaining: u32 },
    /// Code mismatched with no attempts left: lock the account and clear state
    Locked,
}

impl OtpState {
    pub fn from_store(code: Option<String>, attempts: u32) -> Self {
        match code {
            Some(code) => OtpState::Active { code, attempts },
            None => OtpState::NoActiveOtp,
        }
    }

    /// Decide the outcome of submitting `submitted` in this state
    pub fn submit(&self, submitted: &str) -> VerifyOutcome {
        match self {
            OtpState::NoActiveOtp => VerifyOutcome::NoActiveOtp,
            OtpState::Active { code, attempts } => {
                if codes_match(code, submitted) {
                    VerifyOutcome::Verified
                } else if *attempts >= MAX_FAILED_ATTEMPTS {
                    VerifyOutcome::Locked
                } else {
                    VerifyOutcome::WrongCode {
                        attempts: attempts + 1,
                        attempts_remaining: MAX_FAILED_ATTEMPTS - attempts,
                    }
                }
            }
        }
    }
}

impl VerifyOutcome {
    /// The result reported to the caller once the outcome is applied
    pub fn into_result(self) -> Result<(), OtpError> {
        match self {
            VerifyOutcome::NoActiveOtp => Err(OtpError::InvalidOrExpired),
            VerifyOutcome::Verified => Ok(()),
            VerifyOutcome::WrongCode {
                attempts_remaining, ..
            } => Err(OtpError::WrongCode { attempts_remaining }),
            VerifyOutcome::Locked => Err(OtpError::TooManyAttempts),
        }
    }
}

fn codes_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
