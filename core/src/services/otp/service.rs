//! OTP policy engine implementation

use std::collections::HashMap;
use std::sync::Arc;

use tracing;
use vg_shared::utils::mask::mask_email;

use crate::domain::value_objects::{IdentityStatus, OtpState, VerifyOutcome};
use crate::errors::{DomainError, DomainResult, OtpError};

use super::code::generate_otp;
use super::policy::{
    OtpKeys, ACCOUNT_LOCK_TTL_SECS, ATTEMPTS_TTL_SECS, COOLDOWN_SENTINEL, COOLDOWN_TTL_SECS,
    LOCKED_SENTINEL, MAX_REQUESTS_PER_WINDOW, OTP_SUBJECT, OTP_TTL_SECS, REQUEST_WINDOW_SECS,
    SPAM_LOCK_TTL_SECS,
};
use super::traits::{ExpiringStore, NotificationSender};

/// Registration OTP policy engine
///
/// Holds no per-identity state of its own; every decision is made from what
/// the store returns, so any number of instances can share one store.
pub struct OtpPolicyEngine<S: ExpiringStore, N: NotificationSender> {
    /// Expiring key-value store holding all OTP state
    store: Arc<S>,
    /// Delivery channel for issued codes
    sender: Arc<N>,
}

impl<S: ExpiringStore, N: NotificationSender> Clone for OtpPolicyEngine<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<S: ExpiringStore, N: NotificationSender> OtpPolicyEngine<S, N> {
    /// Create a new policy engine
    ///
    /// # Arguments
    ///
    /// * `store` - Expiring store implementation
    /// * `sender` - Notification sender implementation
    pub fn new(store: Arc<S>, sender: Arc<N>) -> Self {
        Self { store, sender }
    }

    /// Resolve which issuance restriction currently applies to `identity`
    ///
    /// Flags are read in precedence order and reading stops at the first one
    /// present.
    pub async fn identity_status(&self, identity: &str) -> DomainResult<IdentityStatus> {
        let keys = OtpKeys::for_identity(identity);

        if self.exists(&keys.account_lock).await? {
            return Ok(IdentityStatus::AccountLocked);
        }
        if self.exists(&keys.spam_lock).await? {
            return Ok(IdentityStatus::SpamLocked);
        }
        if self.exists(&keys.cooldown).await? {
            return Ok(IdentityStatus::OnCooldown);
        }
        Ok(IdentityStatus::Unrestricted)
    }

    /// Fail if the identity is locked or cooling down
    ///
    /// No side effects. Must run before every issuance.
    pub async fn check_restrictions(&self, identity: &str) -> DomainResult<()> {
        let status = self.identity_status(identity).await?;

        if !status.is_unrestricted() {
            tracing::warn!(
                email = %mask_email(identity),
                status = ?status,
                event = "otp_request_restricted",
                "OTP request rejected by restriction check"
            );
        }

        status.ensure_unrestricted().map_err(DomainError::from)
    }

    /// Count an OTP request against the identity's hourly window
    ///
    /// The window TTL is re-armed on every accepted request, so a steady
    /// trickle of requests keeps the counter alive.
    pub async fn track_request(&self, identity: &str) -> DomainResult<()> {
        let keys = OtpKeys::for_identity(identity);
        let raw = self.read(&keys.request_count).await?;
        let count = parse_counter(raw);

        if count >= MAX_REQUESTS_PER_WINDOW {
            self.write(&keys.spam_lock, LOCKED_SENTINEL, SPAM_LOCK_TTL_SECS)
                .await?;

            tracing::warn!(
                email = %mask_email(identity),
                requests = count,
                event = "otp_spam_lock_set",
                "Too many OTP requests, identity spam locked"
            );
            return Err(OtpError::SpamLocked.into());
        }

        self.write(
            &keys.request_count,
            &(count + 1).to_string(),
            REQUEST_WINDOW_SECS,
        )
        .await
    }

    /// Generate a code, send it, then persist it with a cooldown
    ///
    /// Nothing is written unless the send succeeds.
    pub async fn issue_otp(&self, name: &str, identity: &str, template_id: &str) -> DomainResult<()> {
        let keys = OtpKeys::for_identity(identity);
        let code = generate_otp();

        let mut variables = HashMap::new();
        variables.insert("name".to_string(), name.to_string());
        variables.insert("otp".to_string(), code.clone());

        self.sender
            .send(identity, OTP_SUBJECT, template_id, &variables)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(identity),
                    template = template_id,
                    error = %e,
                    event = "otp_send_failed",
                    "Failed to deliver verification email"
                );
                DomainError::NotificationFailure { message: e }
            })?;

        self.write(&keys.otp, &code, OTP_TTL_SECS).await?;
        self.write(&keys.cooldown, COOLDOWN_SENTINEL, COOLDOWN_TTL_SECS)
            .await?;

        tracing::info!(
            email = %mask_email(identity),
            template = template_id,
            event = "otp_issued",
            "Issued verification code"
        );

        Ok(())
    }

    /// Check a submitted code against the active one
    ///
    /// Lock flags, cooldown and the request window are not consulted.
    pub async fn verify_otp(&self, identity: &str, submitted: &str) -> DomainResult<()> {
        let keys = OtpKeys::for_identity(identity);

        let state = match self.read(&keys.otp).await? {
            Some(code) => {
                let raw = self.read(&keys.attempts).await?;
                OtpState::from_store(Some(code), parse_counter(raw))
            }
            None => OtpState::NoActiveOtp,
        };

        let outcome = state.submit(submitted);
        match outcome {
            VerifyOutcome::NoActiveOtp => {
                tracing::info!(
                    email = %mask_email(identity),
                    event = "otp_not_found",
                    "Verification attempted without an active code"
                );
            }
            VerifyOutcome::Verified => {
                self.remove(&keys.verification_state()).await?;
                tracing::info!(
                    email = %mask_email(identity),
                    event = "otp_verified",
                    "Verification code accepted"
                );
            }
            VerifyOutcome::WrongCode {
                attempts,
                attempts_remaining,
            } => {
                self.write(&keys.attempts, &attempts.to_string(), ATTEMPTS_TTL_SECS)
                    .await?;
                tracing::warn!(
                    email = %mask_email(identity),
                    attempts_remaining = attempts_remaining,
                    event = "otp_verification_failed",
                    "Incorrect verification code"
                );
            }
            VerifyOutcome::Locked => {
                self.write(&keys.account_lock, LOCKED_SENTINEL, ACCOUNT_LOCK_TTL_SECS)
                    .await?;
                self.remove(&keys.verification_state()).await?;
                tracing::warn!(
                    email = %mask_email(identity),
                    event = "otp_account_locked",
                    "Too many failed verification attempts, account locked"
                );
            }
        }

        outcome.into_result().map_err(DomainError::from)
    }

    async fn exists(&self, key: &str) -> DomainResult<bool> {
        Ok(self.read(key).await?.is_some())
    }

    async fn read(&self, key: &str) -> DomainResult<Option<String>> {
        self.store.get(key).await.map_err(|e| {
            tracing::error!(error = %e, event = "otp_store_read_failed", "Store read failed");
            DomainError::store(e)
        })
    }

    async fn write(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        self.store.set(key, value, ttl_seconds).await.map_err(|e| {
            tracing::error!(error = %e, event = "otp_store_write_failed", "Store write failed");
            DomainError::store(e)
        })
    }

    async fn remove(&self, keys: &[String]) -> DomainResult<()> {
        self.store.delete(keys).await.map_err(|e| {
            tracing::error!(error = %e, event = "otp_store_delete_failed", "Store delete failed");
            DomainError::store(e)
        })
    }
}

/// Absent counters count as zero; so do unparsable ones
fn parse_counter(raw: Option<String>) -> u32 {
    match raw {
        None => 0,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %value, "Ignoring non-numeric counter value");
            0
        }),
    }
}
