//! Issuance gate status for an identity.

use crate::errors::OtpError;

/// Which issuance restriction, if any, currently applies to an identity
///
/// The flags behind this status are independent store keys; when several
/// are present the most severe wins: account lock, then spam lock, then
/// cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStatus {
    Unrestricted,
    OnCooldown,
    SpamLocked,
    AccountLocked,
}

impl IdentityStatus {
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, IdentityStatus::Unrestricted)
    }

    /// Convert a restricted status into the error shown to the user
    pub fn ensure_unrestricted(self) -> Result<(), OtpError> {
        match self {
            IdentityStatus::Unrestricted => Ok(()),
            IdentityStatus::OnCooldown => Err(OtpError::Cooldown),
            IdentityStatus::SpamLocked => Err(OtpError::SpamLocked),
            IdentityStatus::AccountLocked => Err(OtpError::AccountLocked),
        }
    }
}
